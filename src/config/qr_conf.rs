use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

pub const DEFAULT_QR_WIDTH: u32 = 64;
/// A version 4 code (33 modules) plus its 4-module quiet zone at one pixel
/// per module. Viewer links with a 24-character id need at least version 4.
pub const MIN_QR_WIDTH: u32 = 41;

/// Configuration for invoice QR codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrConfig {
    /// Frontend base URL the invoice viewer lives under
    pub base_url: String,
    /// Rendered image width in pixels
    pub width: u32,
}

impl QrConfig {
    /// Create QrConfig from environment variables
    ///
    /// - FRONTEND_URL: frontend base URL (required)
    /// - QR_CODE_WIDTH: image width in pixels (defaults to 64)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading QR code configuration from environment variables");

        let base_url = env::var("FRONTEND_URL").map_err(|_| {
            error!("FRONTEND_URL environment variable not found");
            ConfigError::EnvVarNotFound("FRONTEND_URL".to_string())
        })?;
        debug!("Frontend URL: {}", base_url);

        let width = env::var("QR_CODE_WIDTH")
            .unwrap_or_else(|_| {
                warn!("QR_CODE_WIDTH not set, defaulting to {}", DEFAULT_QR_WIDTH);
                DEFAULT_QR_WIDTH.to_string()
            })
            .parse::<u32>()
            .map_err(|_| {
                error!("Invalid QR_CODE_WIDTH value");
                ConfigError::InvalidValue("Invalid QR_CODE_WIDTH value".to_string())
            })?;

        let config = QrConfig::new(base_url).with_width(width);
        config.validate()?;
        info!("QR code configuration loaded successfully");
        Ok(config)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        QrConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            width: DEFAULT_QR_WIDTH,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Create QrConfig for testing
    pub fn from_test_env() -> Self {
        QrConfig::new("http://localhost:3000")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            error!("Frontend URL is empty");
            return Err(ConfigError::ValidationError("Frontend URL cannot be empty".to_string()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            error!("Frontend URL must start with http:// or https://");
            return Err(ConfigError::ValidationError(
                "Frontend URL must start with http:// or https://".to_string(),
            ));
        }

        if self.width < MIN_QR_WIDTH {
            error!("QR code width {} is too small", self.width);
            return Err(ConfigError::ValidationError(format!(
                "QR code width must be at least {} pixels",
                MIN_QR_WIDTH
            )));
        }

        Ok(())
    }

    /// Viewer link encoded into an invoice's QR code
    pub fn invoice_url(&self, invoice_id: &str) -> String {
        format!("{}/invoice/{}", self.base_url, invoice_id)
    }
}
