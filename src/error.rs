//! Error types for the toast store.

use thiserror::Error;

/// Main error type for store operations.
///
/// Toast operations themselves never fail; these errors only surface at the
/// edges that talk to the outside world: configuration, serialization and
/// task spawning.
#[derive(Debug, Error)]
pub enum ToastError {
    #[error("Invalid toaster options: {0}")]
    InvalidOptions(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("No async runtime available to drive the promise toast")]
    NoRuntime,
}

impl From<serde_json::Error> for ToastError {
    fn from(e: serde_json::Error) -> Self {
        ToastError::Serialization(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, ToastError>;
