//! Presentation helpers shared with the frontend: amount formatting and
//! validation-message fragments.

pub mod currency;
pub mod error_message;

pub use currency::format_currency;
pub use error_message::{render_error_message, ErrorStyle};
