pub mod invoice_dto;
pub mod user_dto;
