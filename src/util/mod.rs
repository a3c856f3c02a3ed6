pub mod error;
pub mod logger;
pub mod password;
pub mod qr;
