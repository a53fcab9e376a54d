use thiserror::Error;

/// Error for URL processing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Invalid url: {0}")]
    InvalidInput(String),

    #[error("Invalid operation type: {0}")]
    InvalidOperation(String),
}
