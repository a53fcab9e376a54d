use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::Handle;
use crate::domain::account::models::SubscriberId;
use crate::domain::account::ports::AccountRepository;

const SUBSCRIBER_ID_CONSTRAINT: &str = "accounts_subscriber_id_key";
const HANDLE_CONSTRAINT: &str = "accounts_handle_key";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: PgRow) -> Result<Account, AccountError> {
        let column = |e: sqlx::Error| AccountError::DatabaseError(e.to_string());

        Ok(Account {
            id: AccountId::new(row.try_get::<String, _>("id").map_err(column)?),
            subscriber_id: SubscriberId::new(row.try_get("subscriber_id").map_err(column)?)?,
            name: DisplayName::new(row.try_get("name").map_err(column)?)?,
            handle: Handle::new(row.try_get("handle").map_err(column)?)?,
            password_digest: row.try_get("password_digest").map_err(column)?,
            created_at: row.try_get("created_at").map_err(column)?,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, subscriber_id, name, handle, password_digest, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(account.id.as_str())
        .bind(account.subscriber_id.as_str())
        .bind(account.name.as_str())
        .bind(account.handle.as_str())
        .bind(&account.password_digest)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && matches!(
                        db_err.constraint(),
                        Some(SUBSCRIBER_ID_CONSTRAINT) | Some(HANDLE_CONSTRAINT)
                    )
                {
                    return AccountError::AlreadyExists;
                }
            }
            tracing::error!(error = %e, "Failed to insert account");
            AccountError::DatabaseError(e.to_string())
        })?;

        Ok(account)
    }

    async fn count_by_subscriber_id_or_handle(
        &self,
        subscriber_id: &SubscriberId,
        handle: &Handle,
    ) -> Result<u64, AccountError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM accounts
            WHERE subscriber_id = $1 OR handle = $2
            "#,
        )
        .bind(subscriber_id.as_str())
        .bind(handle.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(count.max(0) as u64)
    }

    async fn find_by_credentials(
        &self,
        subscriber_id: &SubscriberId,
        password_digest: &str,
    ) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT id, subscriber_id, name, handle, password_digest, created_at
            FROM accounts
            WHERE subscriber_id = $1 AND password_digest = $2
            "#,
        )
        .bind(subscriber_id.as_str())
        .bind(password_digest)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_account).transpose()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT id, subscriber_id, name, handle, password_digest, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_account).transpose()
    }
}
