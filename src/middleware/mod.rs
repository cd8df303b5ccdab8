mod api_key;
mod error_handler;

pub use api_key::{API_KEY_HEADER, verify_api_key};
pub use error_handler::log_errors;
