use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bson::Document;
use tracing::{debug, error, info};

use crate::repository::mongo_client::MongoConnection;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// Outcome of a bulk update, mirroring the driver's `UpdateResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BulkUpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Schema-free access to whole collections, used by migrations.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn update_many(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> RepositoryResult<BulkUpdateResult>;

    async fn count_documents(&self, collection: &str, filter: Document) -> RepositoryResult<u64>;

    /// Releases the underlying connection. No other call may follow.
    async fn close(&self);
}

#[async_trait]
impl DocumentStore for MongoConnection {
    #[tracing::instrument(skip(self, filter, update))]
    async fn update_many(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> RepositoryResult<BulkUpdateResult> {
        debug!(filter = %filter, update = %update, "Running bulk update");
        let result = self
            .collection::<Document>(collection)
            .update_many(filter, update, None)
            .await;
        match result {
            Ok(result) => {
                info!(
                    matched = result.matched_count,
                    modified = result.modified_count,
                    "Bulk update finished"
                );
                Ok(BulkUpdateResult {
                    matched_count: result.matched_count,
                    modified_count: result.modified_count,
                })
            }
            Err(e) => {
                error!("Bulk update on {} failed: {}", collection, e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn count_documents(&self, collection: &str, filter: Document) -> RepositoryResult<u64> {
        let count = self
            .collection::<Document>(collection)
            .count_documents(filter, None)
            .await?;
        Ok(count)
    }

    async fn close(&self) {
        MongoConnection::close(self).await;
    }
}

/// Process-local document store.
///
/// Supports equality filters and the `$set` / `$unset` operators with the
/// same matched/modified accounting as MongoDB: a document only counts as
/// modified when one of its values actually changes.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    closed: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_many(&self, collection: &str, docs: impl IntoIterator<Item = Document>) {
        let mut collections = self.lock();
        collections
            .entry(collection.to_string())
            .or_default()
            .extend(docs);
    }

    /// True once [`DocumentStore::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Snapshot of every document in a collection
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.lock().get(collection).cloned().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Document>>> {
        // A poisoned lock only means another test thread panicked mid-write.
        self.collections.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn matches(doc: &Document, filter: &Document) -> bool {
        filter.iter().all(|(key, expected)| doc.get(key) == Some(expected))
    }

    fn apply_update(doc: &mut Document, update: &Document) -> RepositoryResult<bool> {
        let mut changed = false;
        for (op, fields) in update {
            let fields = fields.as_document().ok_or_else(|| {
                RepositoryError::validation(format!("Operator {} expects a document", op))
            })?;
            match op.as_str() {
                "$set" => {
                    for (key, value) in fields {
                        if doc.get(key) != Some(value) {
                            doc.insert(key.clone(), value.clone());
                            changed = true;
                        }
                    }
                }
                "$unset" => {
                    for key in fields.keys() {
                        if doc.remove(key).is_some() {
                            changed = true;
                        }
                    }
                }
                other => {
                    return Err(RepositoryError::validation(format!(
                        "Unsupported update operator: {}",
                        other
                    )))
                }
            }
        }
        Ok(changed)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn update_many(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> RepositoryResult<BulkUpdateResult> {
        if update.is_empty() || update.keys().any(|k| !k.starts_with('$')) {
            return Err(RepositoryError::validation(
                "Update document must contain only update operators",
            ));
        }

        let mut collections = self.lock();
        let docs = collections.entry(collection.to_string()).or_default();
        let mut result = BulkUpdateResult::default();
        for doc in docs.iter_mut().filter(|doc| Self::matches(doc, &filter)) {
            result.matched_count += 1;
            if Self::apply_update(doc, &update)? {
                result.modified_count += 1;
            }
        }
        Ok(result)
    }

    async fn count_documents(&self, collection: &str, filter: Document) -> RepositoryResult<u64> {
        let collections = self.lock();
        let count = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| Self::matches(doc, &filter)).count())
            .unwrap_or(0);
        Ok(count as u64)
    }

    async fn close(&self) {
        debug!("Closing in-memory document store");
        self.closed.store(true, Ordering::SeqCst);
    }
}
