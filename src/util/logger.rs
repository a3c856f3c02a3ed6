use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Console plus rolling-file logging.
///
/// Keep the returned value alive for the life of the process; dropping it
/// stops the background writers.
pub struct Logger {
    pub guards: Vec<WorkerGuard>,
}

impl Logger {
    /// `name` becomes the file stem, e.g. `logs/<name>.log`
    pub fn new(name: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let guards = Self::setup_logging(name)?;
        Ok(Logger { guards })
    }

    pub fn setup_logging(name: &str) -> Result<Vec<WorkerGuard>, Box<dyn std::error::Error>> {
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
        let error_dir = format!("{}/error", log_dir);
        std::fs::create_dir_all(&error_dir)?;

        let console_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,invoice_backend=debug"));
        let file_log_level = std::env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());

        let general_file = rolling::daily(&log_dir, format!("{}.log", name));
        let (non_blocking_general, general_guard) = non_blocking(general_file);

        let json_file = rolling::daily(&log_dir, format!("{}.json", name));
        let (non_blocking_json, json_guard) = non_blocking(json_file);

        let error_file = rolling::daily(&error_dir, format!("{}-error.log", name));
        let (non_blocking_error, error_guard) = non_blocking(error_file);

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(true)
                    .with_filter(console_filter),
            )
            .with(
                fmt::layer()
                    .with_writer(non_blocking_general)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(non_blocking_json)
                    .with_ansi(false)
                    .with_target(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .with(
                fmt::layer()
                    .with_writer(non_blocking_error)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("error")),
            )
            .try_init()?;

        Ok(vec![general_guard, json_guard, error_guard])
    }
}
