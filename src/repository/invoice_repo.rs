use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

use crate::model::invoice::Invoice;
use crate::repository::mongo_client::MongoConnection;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn create(&self, invoice: Invoice) -> RepositoryResult<Invoice>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Invoice>;
    async fn update(&self, id: ObjectId, invoice: Invoice) -> RepositoryResult<Invoice>;
    async fn set_qr_code(&self, id: ObjectId, qr_code: &str) -> RepositoryResult<()>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn list(&self, page: u32, limit: u32) -> RepositoryResult<Vec<Invoice>>;
    async fn count(&self) -> RepositoryResult<u64>;
}

pub struct MongoInvoiceRepository {
    collection: mongodb::Collection<Invoice>,
}

impl MongoInvoiceRepository {
    pub fn new(connection: &MongoConnection, collection_name: &str) -> Self {
        MongoInvoiceRepository {
            collection: connection.collection::<Invoice>(collection_name),
        }
    }
}

fn now() -> String {
    chrono::Local::now().to_rfc3339()
}

#[async_trait]
impl InvoiceRepository for MongoInvoiceRepository {
    #[tracing::instrument(skip(self, invoice), fields(invoice_number = %invoice.invoice_number))]
    async fn create(&self, invoice: Invoice) -> RepositoryResult<Invoice> {
        info!("Creating new invoice");
        let mut new_invoice = invoice;
        if new_invoice.id.is_none() {
            new_invoice.id = Some(ObjectId::new());
        }
        let time = now();
        new_invoice.created_at = Some(time.clone());
        new_invoice.updated_at = Some(time);

        match self.collection.insert_one(&new_invoice, None).await {
            Ok(_) => {
                info!("Invoice created successfully");
                Ok(new_invoice)
            }
            Err(e) => {
                error!("Failed to create invoice: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Invoice> {
        let filter = doc! { "_id": id };
        match self.collection.find_one(filter, None).await {
            Ok(Some(invoice)) => Ok(invoice),
            Ok(None) => {
                error!("Invoice not found for ID: {}", id);
                Err(RepositoryError::not_found(format!("Invoice not found for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to fetch invoice by ID: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch invoice by ID: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self, invoice), fields(id = %id))]
    async fn update(&self, id: ObjectId, invoice: Invoice) -> RepositoryResult<Invoice> {
        info!("Updating invoice");
        let mut updated = invoice;
        updated.id = Some(id);
        updated.updated_at = Some(now());

        let mut fields = bson::to_document(&updated)?;
        fields.remove("_id");
        fields.remove("created_at");
        let update = doc! { "$set": fields };

        match self.collection.update_one(doc! { "_id": id }, update, None).await {
            Ok(result) if result.matched_count > 0 => {
                info!("Invoice updated successfully");
                Ok(updated)
            }
            Ok(_) => {
                error!("No invoice found to update for ID: {}", id);
                Err(RepositoryError::not_found(format!("No invoice found to update for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to update invoice: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self, qr_code), fields(id = %id))]
    async fn set_qr_code(&self, id: ObjectId, qr_code: &str) -> RepositoryResult<()> {
        let update = doc! { "$set": { "qr_code": qr_code, "updated_at": now() } };
        let result = self.collection.update_one(doc! { "_id": id }, update, None).await?;
        if result.matched_count == 0 {
            return Err(RepositoryError::not_found(format!("No invoice found for ID: {}", id)));
        }
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        info!("Deleting invoice");
        match self.collection.delete_one(doc! { "_id": id }, None).await {
            Ok(result) if result.deleted_count > 0 => {
                info!("Invoice deleted successfully");
                Ok(())
            }
            Ok(_) => {
                error!("No invoice found to delete for ID: {}", id);
                Err(RepositoryError::not_found(format!("No invoice found to delete for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to delete invoice: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, page: u32, limit: u32) -> RepositoryResult<Vec<Invoice>> {
        let skip = u64::from(page.saturating_sub(1)) * u64::from(limit);
        let options = FindOptions::builder()
            .sort(doc! { "invoice_date": -1, "_id": -1 })
            .skip(skip)
            .limit(i64::from(limit))
            .build();
        let cursor = self.collection.find(None, options).await.map_err(|e| {
            error!("Failed to list invoices: {}", e);
            RepositoryError::database(format!("Failed to list invoices: {}", e))
        })?;
        let invoices: Vec<Invoice> = cursor.try_collect().await.map_err(|e| {
            error!("Failed to deserialize invoice: {}", e);
            RepositoryError::serialization(format!("Failed to deserialize invoice: {}", e))
        })?;
        info!("Fetched {} invoices", invoices.len());
        Ok(invoices)
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<u64> {
        let count = self.collection.count_documents(None, None).await?;
        Ok(count)
    }
}
