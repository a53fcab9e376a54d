//! Process-local record stores.
//!
//! Used when no database url is configured and by the integration tests.
//! The account store rejects duplicate subscriber ids and handles on insert,
//! mirroring the unique constraints of the PostgreSQL schema.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Handle;
use crate::domain::account::models::SubscriberId;
use crate::domain::account::ports::AccountRepository;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDetails;
use crate::domain::book::models::BookId;
use crate::domain::book::ports::BookRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        let taken = accounts.values().any(|existing| {
            existing.subscriber_id == account.subscriber_id || existing.handle == account.handle
        });
        if taken || accounts.contains_key(&account.id) {
            return Err(AccountError::AlreadyExists);
        }

        accounts.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    async fn count_by_subscriber_id_or_handle(
        &self,
        subscriber_id: &SubscriberId,
        handle: &Handle,
    ) -> Result<u64, AccountError> {
        let count = self
            .accounts
            .read()
            .await
            .values()
            .filter(|a| &a.subscriber_id == subscriber_id || &a.handle == handle)
            .count();
        Ok(count as u64)
    }

    async fn find_by_credentials(
        &self,
        subscriber_id: &SubscriberId,
        password_digest: &str,
    ) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| &a.subscriber_id == subscriber_id && a.password_digest == password_digest)
            .cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(id).cloned())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryBookRepository {
    books: Arc<RwLock<HashMap<BookId, Book>>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        self.books.write().await.insert(book.id, book.clone());
        Ok(book)
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        let mut books: Vec<Book> = self.books.read().await.values().cloned().collect();
        books.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(books)
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        Ok(self.books.read().await.get(id).cloned())
    }

    async fn update(
        &self,
        id: &BookId,
        details: BookDetails,
        updated_at: DateTime<Utc>,
    ) -> Result<Book, BookError> {
        let mut books = self.books.write().await;
        let book = books
            .get_mut(id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        book.details = details;
        book.updated_at = updated_at;

        Ok(book.clone())
    }

    async fn delete(&self, id: &BookId) -> Result<(), BookError> {
        self.books
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }
}
