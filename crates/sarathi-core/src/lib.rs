pub mod chat;
pub mod config;
pub mod error;
pub mod session;

// Re-export common error types
pub use error::{ApiError, SarathiError};
