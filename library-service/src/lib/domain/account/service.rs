use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::IssuedToken;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Registration checks uniqueness with one combined count before inserting.
/// The check and the insert are separate store calls with no transaction, so
/// two concurrent registrations for the same handle can both pass the check;
/// the store's unique constraints are the only backstop and surface as
/// `AlreadyExists` from `create`.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Shared, read-only credential and token authority
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError> {
        let existing = self
            .repository
            .count_by_subscriber_id_or_handle(&command.subscriber_id, &command.handle)
            .await?;
        if existing > 0 {
            return Err(AccountError::AlreadyExists);
        }

        let account = Account {
            id: AccountId::new(self.authenticator.new_identity()),
            subscriber_id: command.subscriber_id,
            name: command.name,
            handle: command.handle,
            password_digest: self.authenticator.hash_password(command.secret.expose()),
            created_at: Utc::now(),
        };

        let created = self.repository.create(account).await?;
        tracing::info!(account_id = %created.id, "Account registered");

        Ok(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, AccountError> {
        let digest = self.authenticator.hash_password(command.secret.expose());

        let account = self
            .repository
            .find_by_credentials(&command.subscriber_id, &digest)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        self.authenticator
            .authenticate(
                command.secret.expose(),
                &account.password_digest,
                account.id.as_str(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
                AuthenticationError::JwtError(err) => AccountError::TokenFailed(err.to_string()),
            })
    }

    async fn profile(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }
}
