use bson::doc;
use mongodb::{
    options::{ClientOptions, Credential},
    Client, Database,
};
use tracing::{debug, error, info};

use crate::config::mongo_conf::MongoConfig;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

const APP_NAME: &str = "InvoiceBackend";

/// A live client plus the configured database.
///
/// Dropping it releases the pool lazily; call [`MongoConnection::close`] to
/// wait for the driver to shut down.
#[derive(Clone)]
pub struct MongoConnection {
    client: Client,
    database: Database,
}

impl MongoConnection {
    /// Build a client from config and ping the server.
    ///
    /// The driver connects lazily, so without the ping a bad URI or an
    /// unreachable host would only surface on the first real query. The ping
    /// is bounded by the configured connection timeout.
    #[tracing::instrument(skip(config), fields(database = %config.database))]
    pub async fn connect(config: &MongoConfig) -> RepositoryResult<Self> {
        let timeout = config.connection_timeout();
        let mut client_options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| RepositoryError::connection(format!("Invalid MongoDB URI: {}", e)))?;
        client_options.app_name = Some(APP_NAME.to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(timeout);
        client_options.server_selection_timeout = Some(timeout);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            client_options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(client_options)?;
        let database = client.database(&config.database);

        debug!("Pinging MongoDB with a {:?} timeout", timeout);
        match tokio::time::timeout(timeout, database.run_command(doc! { "ping": 1 }, None)).await {
            Ok(Ok(_)) => {
                info!("Connected to MongoDB");
                Ok(MongoConnection { client, database })
            }
            Ok(Err(e)) => {
                error!("MongoDB ping failed: {}", e);
                Err(RepositoryError::connection(format!("MongoDB ping failed: {}", e)))
            }
            Err(_) => {
                error!("MongoDB did not answer within {:?}", timeout);
                Err(RepositoryError::connection(format!(
                    "Timed out after {:?} connecting to MongoDB",
                    timeout
                )))
            }
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn collection<T>(&self, name: &str) -> mongodb::Collection<T> {
        self.database.collection::<T>(name)
    }

    /// Shuts the driver down, waiting for in-flight operations to finish.
    pub async fn close(&self) {
        info!("Closing MongoDB connection");
        self.client.clone().shutdown().await;
    }
}
