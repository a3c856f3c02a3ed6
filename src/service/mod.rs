pub mod invoice_service;
pub mod user_service;
