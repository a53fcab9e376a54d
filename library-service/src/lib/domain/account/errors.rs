use thiserror::Error;

/// Error for subscriber identifier (MSISDN) validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubscriberIdError {
    #[error("Subscriber id must be exactly {expected} digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Subscriber id must contain digits only")]
    NonNumeric,

    #[error("Subscriber id must start with country code {prefix}")]
    MissingCountryCode { prefix: &'static str },
}

/// Error for handle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandleError {
    #[error("Handle is required")]
    Empty,
}

/// Error for display name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Name is required")]
    Empty,
}

/// Error for raw secret validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Secret is required")]
    Empty,
}

/// Top-level error for all account-related operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid subscriber id: {0}")]
    InvalidSubscriberId(#[from] SubscriberIdError),

    #[error("Invalid handle: {0}")]
    InvalidHandle(#[from] HandleError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] DisplayNameError),

    #[error("Invalid secret: {0}")]
    InvalidSecret(#[from] SecretError),

    // Domain-level errors
    #[error("Subscriber id or handle already exists")]
    AlreadyExists,

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token generation failed: {0}")]
    TokenFailed(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AccountError {
    /// True for shape errors detected before any store access.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AccountError::InvalidSubscriberId(_)
                | AccountError::InvalidHandle(_)
                | AccountError::InvalidName(_)
                | AccountError::InvalidSecret(_)
        )
    }
}
