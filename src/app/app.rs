use axum::{Router, routing::get};
use std::sync::Arc;
use tracing::info;
use crate::config::{AppConfig, MongoConfig, QrConfig};
use crate::repository::invoice_repo::MongoInvoiceRepository;
use crate::repository::mongo_client::MongoConnection;
use crate::repository::user_repo::UserRepositoryImpl;
use crate::router::invoice_router::invoice_router;
use crate::router::user_router::user_router;
use crate::service::invoice_service::InvoiceServiceImpl;
use crate::service::user_service::UserServiceImpl;
use crate::util::qr::QrCodeGenerator;

pub struct App {
    config: AppConfig,
    router: Router,
    connection: MongoConnection,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env();
        let mongo_config = MongoConfig::from_env()?;
        let qr_config = QrConfig::from_env()?;

        let connection = MongoConnection::connect(&mongo_config).await?;
        let invoice_repo = Arc::new(MongoInvoiceRepository::new(&connection, &mongo_config.invoice_collection));
        let user_repo = Arc::new(UserRepositoryImpl::new(&connection));

        let invoice_service = Arc::new(InvoiceServiceImpl::new(invoice_repo, QrCodeGenerator::new(qr_config)));
        let user_service = Arc::new(UserServiceImpl::new(user_repo));

        let router = build_router(invoice_service, user_service);
        Ok(App { config, router, connection })
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.socket_addr()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("🚀 Server running at http://{}", addr);
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        self.connection.close().await;
        info!("Server stopped");
        Ok(())
    }
}

/// Every route the service exposes, on top of the given services.
pub fn build_router(invoice_service: Arc<InvoiceServiceImpl>, user_service: Arc<UserServiceImpl>) -> Router {
    Router::new()
        .merge(invoice_router(invoice_service))
        .merge(user_router(user_service))
        .route("/health", get(|| async { "OK" }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
