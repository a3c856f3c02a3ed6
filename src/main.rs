use dotenv::dotenv;
use std::process::ExitCode;
use tracing::{error, info, warn};

use invoice_backend::app::app::App;
use invoice_backend::util::logger::Logger;

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_result = dotenv();

    let _logger = match Logger::new("invoice-backend") {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialise logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("🚀 Starting Invoice Backend");
    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to start application: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = app.start().await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
