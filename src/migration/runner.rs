use std::process::ExitCode;

use tracing::{error, info, warn};

use crate::config::{mongo_conf::MongoConfig, ConfigError};
use crate::migration::{apply_migration, Migration, MigrationReport};
use crate::repository::document_store::DocumentStore;
use crate::repository::mongo_client::MongoConnection;
use crate::repository::repository_error::RepositoryError;
use crate::util::logger::Logger;

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not connect to MongoDB: {0}")]
    Connection(#[source] RepositoryError),

    #[error("Migration failed: {0}")]
    Mutation(#[source] RepositoryError),
}

impl MigrationError {
    /// `1` when nothing was attempted, `2` when the bulk update itself failed.
    pub fn exit_code(&self) -> u8 {
        match self {
            MigrationError::Config(_) | MigrationError::Connection(_) => 1,
            MigrationError::Mutation(_) => 2,
        }
    }
}

/// Connect, apply one migration, disconnect.
///
/// The connection is closed whether or not the migration succeeds.
pub async fn run_migration(
    config: &MongoConfig,
    migration: &dyn Migration,
) -> Result<MigrationReport, MigrationError> {
    let connection = MongoConnection::connect(config)
        .await
        .map_err(MigrationError::Connection)?;

    run_migration_on(&connection, migration).await
}

/// Applies one migration to an already connected store, then closes it.
///
/// The store is closed on failure too; a failed update becomes
/// [`MigrationError::Mutation`].
pub async fn run_migration_on(
    store: &dyn DocumentStore,
    migration: &dyn Migration,
) -> Result<MigrationReport, MigrationError> {
    let outcome = apply_migration(store, migration).await;
    store.close().await;

    outcome.map_err(MigrationError::Mutation)
}

/// Maps a run outcome to the process exit status, logging the summary.
pub fn report_outcome(outcome: &Result<MigrationReport, MigrationError>) -> ExitCode {
    match outcome {
        Ok(report) => {
            info!(
                migration = %report.migration,
                collection = %report.collection,
                "Matched {} documents, modified {}",
                report.matched_count,
                report.modified_count
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Entry point shared by the migration binaries.
///
/// Loads `.env`, sets up logging, reads [`MongoConfig`], builds the migration
/// from it and runs it.
pub async fn run_cli<M, F>(log_name: &str, build: F) -> ExitCode
where
    M: Migration,
    F: FnOnce(&MongoConfig) -> M,
{
    let dotenv_result = dotenv::dotenv();
    let _logger = match Logger::new(log_name) {
        Ok(logger) => Some(logger),
        Err(e) => {
            let _ = tracing_subscriber::fmt().try_init();
            warn!("File logging unavailable, using console only: {}", e);
            None
        }
    };
    if let Err(e) = dotenv_result {
        warn!("Failed to load .env file: {} (using system env vars)", e);
    }

    let outcome = run_from_env(build).await;
    report_outcome(&outcome)
}

async fn run_from_env<M, F>(build: F) -> Result<MigrationReport, MigrationError>
where
    M: Migration,
    F: FnOnce(&MongoConfig) -> M,
{
    let config = MongoConfig::from_env()?;
    let migration = build(&config);
    info!(migration = migration.name(), "Starting migration");
    run_migration(&config, &migration).await
}
