//! One-shot bulk mutations of existing collections.
//!
//! A migration is a filter plus an update document aimed at one collection.
//! [`apply_migration`] runs it through any [`DocumentStore`]; the [`runner`]
//! module wraps that with configuration, connection handling and exit codes
//! for the binaries under `src/bin/`.

pub mod backfill_invoice_fields;
pub mod remove_user_lockout;
pub mod runner;

use bson::{doc, Document};
use serde::Serialize;
use tracing::{error, info};

use crate::repository::document_store::DocumentStore;
use crate::repository::repository_error::RepositoryResult;

pub use backfill_invoice_fields::{BackfillInvoiceFields, InvoiceFieldDefaults};
pub use remove_user_lockout::RemoveUserLockoutFields;
pub use runner::{run_migration, run_migration_on, MigrationError};

pub trait Migration: Send + Sync {
    fn name(&self) -> &str;

    fn collection(&self) -> &str;

    /// Documents to touch; every document by default.
    fn filter(&self) -> Document {
        doc! {}
    }

    fn update(&self) -> Document;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub migration: String,
    pub collection: String,
    pub matched_count: u64,
    pub modified_count: u64,
}

#[tracing::instrument(skip_all, fields(migration = migration.name(), collection = migration.collection()))]
pub async fn apply_migration(
    store: &dyn DocumentStore,
    migration: &dyn Migration,
) -> RepositoryResult<MigrationReport> {
    info!("Applying migration");
    let result = store
        .update_many(migration.collection(), migration.filter(), migration.update())
        .await;

    match result {
        Ok(result) => {
            info!(
                matched = result.matched_count,
                modified = result.modified_count,
                "Migration applied"
            );
            Ok(MigrationReport {
                migration: migration.name().to_string(),
                collection: migration.collection().to_string(),
                matched_count: result.matched_count,
                modified_count: result.modified_count,
            })
        }
        Err(e) => {
            error!("Migration failed: {}", e);
            Err(e)
        }
    }
}
