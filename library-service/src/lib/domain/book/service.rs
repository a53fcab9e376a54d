use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDetails;
use crate::domain::book::models::BookId;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::ports::BookServicePort;

/// Domain service implementation for book catalogue operations.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn add_book(&self, details: BookDetails) -> Result<Book, BookError> {
        let now = Utc::now();
        let book = Book {
            id: BookId::new(),
            details,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(book).await?;
        tracing::info!(book_id = %created.id, "Book added");

        Ok(created)
    }

    async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        let books = self.repository.list_all().await?;
        if books.is_empty() {
            return Err(BookError::Empty);
        }
        Ok(books)
    }

    async fn get_book(&self, id: &BookId) -> Result<Book, BookError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }

    async fn update_book(&self, id: &BookId, details: BookDetails) -> Result<Book, BookError> {
        let updated = self.repository.update(id, details, Utc::now()).await?;
        tracing::info!(book_id = %id, "Book updated");
        Ok(updated)
    }

    async fn delete_book(&self, id: &BookId) -> Result<(), BookError> {
        self.repository.delete(id).await?;
        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }
}
