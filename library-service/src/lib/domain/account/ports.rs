use async_trait::async_trait;
use auth::IssuedToken;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Handle;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::SubscriberId;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated registration fields and raw secret
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `AlreadyExists` - Subscriber id or handle is already taken
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError>;

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown subscriber id or wrong secret (indistinguishable)
    /// * `TokenFailed` - Token could not be signed
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, AccountError>;

    /// Retrieve the account behind an authenticated identity.
    ///
    /// # Errors
    /// * `NotFound` - No account with this identity
    /// * `DatabaseError` - Store operation failed
    async fn profile(&self, id: &AccountId) -> Result<Account, AccountError>;
}

/// Persistence operations for account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist new account to storage.
    ///
    /// # Errors
    /// * `AlreadyExists` - A unique constraint rejected the insert
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Count accounts matching the subscriber id OR the handle.
    async fn count_by_subscriber_id_or_handle(
        &self,
        subscriber_id: &SubscriberId,
        handle: &Handle,
    ) -> Result<u64, AccountError>;

    /// Retrieve account matching both subscriber id and password digest.
    ///
    /// # Returns
    /// Optional account entity (None if either part does not match)
    async fn find_by_credentials(
        &self,
        subscriber_id: &SubscriberId,
        password_digest: &str,
    ) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by identity.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
}
