use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDetails;
use crate::domain::book::models::BookId;

/// Port for book catalogue operations.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// Add a book to the catalogue, assigning its id and timestamps.
    async fn add_book(&self, details: BookDetails) -> Result<Book, BookError>;

    /// List every book.
    ///
    /// # Errors
    /// * `Empty` - The catalogue holds no books
    /// * `DatabaseError` - Store operation failed
    async fn list_books(&self) -> Result<Vec<Book>, BookError>;

    async fn get_book(&self, id: &BookId) -> Result<Book, BookError>;

    /// Replace the editable fields of a book.
    ///
    /// # Errors
    /// * `NotFound` - No book with this id
    /// * `DatabaseError` - Store operation failed
    async fn update_book(&self, id: &BookId, details: BookDetails) -> Result<Book, BookError>;

    async fn delete_book(&self, id: &BookId) -> Result<(), BookError>;
}

/// Persistence operations for book aggregate.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    async fn create(&self, book: Book) -> Result<Book, BookError>;

    /// Retrieve all books, newest first.
    async fn list_all(&self) -> Result<Vec<Book>, BookError>;

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError>;

    /// Overwrite editable fields and `updated_at`.
    ///
    /// # Errors
    /// * `NotFound` - No row matched the id
    async fn update(
        &self,
        id: &BookId,
        details: BookDetails,
        updated_at: DateTime<Utc>,
    ) -> Result<Book, BookError>;

    /// # Errors
    /// * `NotFound` - No row matched the id
    async fn delete(&self, id: &BookId) -> Result<(), BookError>;
}
