use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDetails;
use crate::domain::book::models::BookId;
use crate::domain::book::ports::BookRepository;

const BOOK_COLUMNS: &str = "id, title, author, year, isbn, genre, description, cover_image_url, \
                            created_at, updated_at";

pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_book(row: PgRow) -> Result<Book, BookError> {
        let column = |e: sqlx::Error| BookError::DatabaseError(e.to_string());

        Ok(Book {
            id: BookId(row.try_get::<Uuid, _>("id").map_err(column)?),
            details: BookDetails {
                title: row.try_get("title").map_err(column)?,
                author: row.try_get("author").map_err(column)?,
                year: row.try_get("year").map_err(column)?,
                isbn: row.try_get("isbn").map_err(column)?,
                genre: row.try_get("genre").map_err(column)?,
                description: row.try_get("description").map_err(column)?,
                cover_image_url: row.try_get("cover_image_url").map_err(column)?,
            },
            created_at: row.try_get("created_at").map_err(column)?,
            updated_at: row.try_get("updated_at").map_err(column)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> BookError {
    tracing::error!(error = %e, "Book store operation failed");
    BookError::DatabaseError(e.to_string())
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, year, isbn, genre, description,
                               cover_image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(book.id.0)
        .bind(&book.details.title)
        .bind(&book.details.author)
        .bind(book.details.year)
        .bind(book.details.isbn.as_deref())
        .bind(book.details.genre.as_deref())
        .bind(book.details.description.as_deref())
        .bind(book.details.cover_image_url.as_deref())
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(book)
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM books ORDER BY created_at DESC",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Self::row_to_book).collect()
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        let row = sqlx::query(&format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(Self::row_to_book).transpose()
    }

    async fn update(
        &self,
        id: &BookId,
        details: BookDetails,
        updated_at: DateTime<Utc>,
    ) -> Result<Book, BookError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE books
            SET title = $2, author = $3, year = $4, isbn = $5, genre = $6,
                description = $7, cover_image_url = $8, updated_at = $9
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(id.0)
        .bind(&details.title)
        .bind(&details.author)
        .bind(details.year)
        .bind(details.isbn.as_deref())
        .bind(details.genre.as_deref())
        .bind(details.description.as_deref())
        .bind(details.cover_image_url.as_deref())
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(row) => Self::row_to_book(row),
            None => Err(BookError::NotFound(id.to_string())),
        }
    }

    async fn delete(&self, id: &BookId) -> Result<(), BookError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
