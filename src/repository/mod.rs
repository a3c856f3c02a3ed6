pub mod repository_error;
pub mod mongo_client;
pub mod document_store;
pub mod invoice_repo;
pub mod user_repo;
