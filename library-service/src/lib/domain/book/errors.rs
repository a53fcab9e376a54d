use thiserror::Error;

/// Error for BookId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for book field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookDetailsError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Author is required")]
    MissingAuthor,

    #[error("Year must be between {min} and {max}, got {actual}")]
    YearOutOfRange { min: i32, max: i32, actual: i32 },

    #[error("Cover image url is not an absolute url: {0}")]
    InvalidCoverImageUrl(String),
}

/// Top-level error for all book-related operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("Invalid book id: {0}")]
    InvalidBookId(#[from] BookIdError),

    #[error("Invalid book details: {0}")]
    InvalidDetails(#[from] BookDetailsError),

    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("No books in the catalogue")]
    Empty,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
