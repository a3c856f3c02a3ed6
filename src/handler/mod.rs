pub mod invoice_handler;
pub mod user_handler;
