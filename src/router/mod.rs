pub mod invoice_router;
pub mod user_router;
