//! Runs against a live MongoDB from `.env` (`MONGO_URI`). Ignored by default:
//! `cargo test --test invoice_repo_test -- --ignored`

use bson::doc;
use chrono::NaiveDate;
use invoice_backend::config::mongo_conf::MongoConfig;
use invoice_backend::migration::{apply_migration, BackfillInvoiceFields};
use invoice_backend::model::invoice::Invoice;
use invoice_backend::repository::document_store::DocumentStore;
use invoice_backend::repository::invoice_repo::{InvoiceRepository, MongoInvoiceRepository};
use invoice_backend::repository::mongo_client::MongoConnection;
use invoice_backend::repository::repository_error::RepositoryError;

const TEST_COLLECTION: &str = "invoice_repo_test";

async fn setup_connection() -> MongoConnection {
    let _ = dotenv::dotenv();
    let config = MongoConfig::from_env().expect("Failed to load MongoConfig");
    MongoConnection::connect(&config).await.expect("Failed to connect to MongoDB")
}

#[tokio::test]
#[ignore]
async fn test_invoice_repository_workflow() {
    let connection = setup_connection().await;
    let repo = MongoInvoiceRepository::new(&connection, TEST_COLLECTION);

    let mut invoice = Invoice::new("INV-REPO-1", NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    invoice.po_no = Some("PO-1".to_string());

    let created = repo.create(invoice).await.expect("Failed to insert invoice");
    let id = created.id.expect("id assigned");
    assert!(created.created_at.is_some());

    let fetched = repo.get_by_id(id).await.expect("Failed to fetch invoice");
    assert_eq!(fetched.invoice_number, "INV-REPO-1");
    assert_eq!(fetched.po_no.as_deref(), Some("PO-1"));

    let mut changed = fetched.clone();
    changed.eway_no = Some("EW-1".to_string());
    repo.update(id, changed).await.expect("Failed to update invoice");
    repo.set_qr_code(id, "data:image/png;base64,AAAA").await.expect("Failed to set QR code");

    let fetched = repo.get_by_id(id).await.unwrap();
    assert_eq!(fetched.eway_no.as_deref(), Some("EW-1"));
    assert_eq!(fetched.qr_code.as_deref(), Some("data:image/png;base64,AAAA"));
    assert_eq!(fetched.created_at, created.created_at);

    let listed = repo.list(1, 100).await.expect("Failed to list invoices");
    assert!(listed.iter().any(|i| i.id == Some(id)));

    repo.delete(id).await.expect("Failed to delete invoice");
    assert!(matches!(repo.get_by_id(id).await, Err(RepositoryError::NotFound(_))));
    assert!(matches!(repo.delete(id).await, Err(RepositoryError::NotFound(_))));

    connection.close().await;
}

#[tokio::test]
#[ignore]
async fn test_backfill_against_mongodb() {
    let connection = setup_connection().await;
    let collection = connection.collection::<bson::Document>(TEST_COLLECTION);
    collection.delete_many(doc! {}, None).await.unwrap();
    collection
        .insert_many(
            vec![
                doc! { "invoice_number": "A", "invoice_date": "2024-01-01" },
                doc! { "invoice_number": "B", "invoice_date": "2024-01-02", "po_no": "X" },
            ],
            None,
        )
        .await
        .unwrap();

    let migration = BackfillInvoiceFields::new(TEST_COLLECTION);
    let first = apply_migration(&connection, &migration).await.unwrap();
    assert_eq!((first.matched_count, first.modified_count), (2, 2));
    let second = apply_migration(&connection, &migration).await.unwrap();
    assert_eq!((second.matched_count, second.modified_count), (2, 0));

    let backfilled = connection
        .count_documents(TEST_COLLECTION, doc! { "challan_no": "NA", "po_no": "NA", "eway_no": "NA" })
        .await
        .unwrap();
    assert_eq!(backfilled, 2);

    collection.delete_many(doc! {}, None).await.unwrap();
    connection.close().await;
}
