use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Primary environment variable holding the store connection string.
pub const MONGO_URI_VAR: &str = "MONGO_URI";
/// Older name still found in some deployments; read only when `MONGO_URI` is absent.
pub const LEGACY_MONGO_URI_VAR: &str = "MONGODB_URI";

pub const DEFAULT_DATABASE: &str = "invoice_manager";
pub const DEFAULT_INVOICE_COLLECTION: &str = "invoicemodels";
pub const USER_COLLECTION: &str = "users";

/// MongoDB configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// MongoDB connection URI
    pub uri: String,
    /// Database name
    pub database: String,
    /// Username for authentication (optional)
    pub username: Option<String>,
    /// Password for authentication (optional)
    pub password: Option<String>,
    /// Collection holding invoice documents
    pub invoice_collection: String,
    /// Connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Load MongoDB configuration from environment variables
    ///
    /// Expected environment variables:
    /// - MONGO_URI: MongoDB connection URI (required, MONGODB_URI accepted as a fallback)
    /// - MONGO_DATABASE: Database name (defaults to invoice_manager)
    /// - MONGO_INVOICE_COLLECTION: Invoice collection (defaults to invoicemodels)
    /// - MONGO_POOL_SIZE: Connection pool size (defaults to 10)
    /// - MONGO_CONNECTION_TIMEOUT: Connection timeout in seconds (defaults to 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment variables");

        let uri = Self::uri_from_env()?;

        let database = env::var("MONGO_DATABASE").unwrap_or_else(|_| {
            warn!("MONGO_DATABASE not set, using default: {}", DEFAULT_DATABASE);
            DEFAULT_DATABASE.to_string()
        });
        debug!("MongoDB database: {}", database);

        let username = env::var("MONGO_USERNAME").ok();
        if let Some(ref user) = username {
            debug!("MongoDB username: {}", user);
        } else {
            debug!("No MongoDB username specified");
        }

        let password = env::var("MONGO_PASSWORD").ok();
        if password.is_some() {
            debug!("MongoDB password provided");
        } else {
            debug!("No MongoDB password specified");
        }

        let invoice_collection = env::var("MONGO_INVOICE_COLLECTION")
            .unwrap_or_else(|_| DEFAULT_INVOICE_COLLECTION.to_string());
        debug!("MongoDB invoice collection: {}", invoice_collection);

        let pool_size = env::var("MONGO_POOL_SIZE")
            .unwrap_or_else(|_| {
                warn!("MONGO_POOL_SIZE not set, using default: 10");
                "10".to_string()
            })
            .parse::<u32>()
            .map_err(|_| {
                error!("Invalid MONGO_POOL_SIZE value");
                ConfigError::InvalidValue("Invalid MONGO_POOL_SIZE value".to_string())
            })?;
        debug!("MongoDB pool size: {}", pool_size);

        let connection_timeout_secs = env::var("MONGO_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| {
                warn!("MONGO_CONNECTION_TIMEOUT not set, using default: 5 seconds");
                "5".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid MONGO_CONNECTION_TIMEOUT value");
                ConfigError::InvalidValue("Invalid MONGO_CONNECTION_TIMEOUT value".to_string())
            })?;
        debug!("MongoDB connection timeout: {} seconds", connection_timeout_secs);

        let config = MongoConfig {
            uri,
            database,
            username,
            password,
            invoice_collection,
            pool_size,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("MongoDB configuration loaded successfully");
        Ok(config)
    }

    fn uri_from_env() -> Result<String, ConfigError> {
        if let Ok(uri) = env::var(MONGO_URI_VAR) {
            return Ok(uri);
        }
        match env::var(LEGACY_MONGO_URI_VAR) {
            Ok(uri) => {
                warn!(
                    "{} not set, falling back to {}; rename it to {}",
                    MONGO_URI_VAR, LEGACY_MONGO_URI_VAR, MONGO_URI_VAR
                );
                Ok(uri)
            }
            Err(_) => {
                error!("{} environment variable not found", MONGO_URI_VAR);
                Err(ConfigError::EnvVarNotFound(MONGO_URI_VAR.to_string()))
            }
        }
    }

    /// Create MongoConfig for testing
    pub fn from_test_env() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "invoice_test_db".to_string(),
            username: None,
            password: None,
            invoice_collection: "test_invoices".to_string(),
            pool_size: 2,
            connection_timeout_secs: 2,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        info!("Validating MongoDB configuration");

        if self.uri.trim().is_empty() {
            error!("MongoDB URI is empty");
            return Err(ConfigError::ValidationError("MongoDB URI cannot be empty".to_string()));
        }

        if !(self.uri.starts_with("mongodb://") || self.uri.starts_with("mongodb+srv://")) {
            error!("MongoDB URI has an unsupported scheme");
            return Err(ConfigError::ValidationError(
                "MongoDB URI must start with mongodb:// or mongodb+srv://".to_string(),
            ));
        }

        if self.database.is_empty() {
            error!("MongoDB database is empty");
            return Err(ConfigError::ValidationError("MongoDB database cannot be empty".to_string()));
        }

        if self.invoice_collection.is_empty() {
            error!("MongoDB invoice collection is empty");
            return Err(ConfigError::ValidationError(
                "MongoDB invoice collection cannot be empty".to_string(),
            ));
        }

        if self.pool_size == 0 {
            error!("MongoDB pool size is 0");
            return Err(ConfigError::ValidationError("MongoDB pool size must be greater than 0".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            error!("MongoDB connection timeout is 0");
            return Err(ConfigError::ValidationError("MongoDB connection timeout must be greater than 0".to_string()));
        }

        if let Some(ref user) = self.username {
            if user.is_empty() {
                error!("MongoDB username is empty");
                return Err(ConfigError::ValidationError("MongoDB username cannot be empty if set".to_string()));
            }
        }
        if let Some(ref pass) = self.password {
            if pass.is_empty() {
                error!("MongoDB password is empty");
                return Err(ConfigError::ValidationError("MongoDB password cannot be empty if set".to_string()));
            }
        }
        info!("MongoDB configuration validation successful");
        Ok(())
    }

    pub fn connection_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.connection_timeout_secs)
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: DEFAULT_DATABASE.to_string(),
            username: None,
            password: None,
            invoice_collection: DEFAULT_INVOICE_COLLECTION.to_string(),
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}
