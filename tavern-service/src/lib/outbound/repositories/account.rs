use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::UpdateProfileCommand;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;

const ACCOUNT_COLUMNS: &str = "id, email, username, password_hash, display_name, \
     profile_picture, created_at, updated_at, is_active";

/// PostgreSQL implementation of the account directory.
///
/// Uniqueness of id, email and username is enforced by table constraints;
/// violations come back as the matching domain conflict.
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<Account>, AccountError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE {column} = $1");

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    username: String,
    password_hash: String,
    display_name: String,
    profile_picture: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_active: bool,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(r: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(r.id),
            email: EmailAddress::new(r.email)?,
            username: Username::new(r.username)?,
            password_hash: r.password_hash,
            display_name: r.display_name,
            profile_picture: r.profile_picture,
            created_at: r.created_at,
            updated_at: r.updated_at,
            is_active: r.is_active,
        })
    }
}

fn map_write_error(e: sqlx::Error, account_email: &str, account_username: &str) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("accounts_username_key") {
                return AccountError::UsernameAlreadyExists(account_username.to_string());
            }
            if db_err.constraint() == Some("accounts_email_key") {
                return AccountError::EmailAlreadyExists(account_email.to_string());
            }
        }
    }
    AccountError::DatabaseError(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, username, password_hash, display_name,
                                  profile_picture, created_at, updated_at, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(account.username.as_str())
        .bind(&account.password_hash)
        .bind(&account.display_name)
        .bind(account.profile_picture.as_deref())
        .bind(account.created_at)
        .bind(account.updated_at)
        .bind(account.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, account.email.as_str(), account.username.as_str()))?;

        tracing::debug!(account_id = %account.id, "Account row inserted");
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        self.find_one("email", email).await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountError> {
        self.find_one("username", username.as_str()).await
    }

    async fn update_profile(
        &self,
        id: &AccountId,
        changes: &UpdateProfileCommand,
        updated_at: DateTime<Utc>,
    ) -> Result<Account, AccountError> {
        let query = format!(
            r#"
            UPDATE accounts
            SET display_name = COALESCE($2, display_name),
                profile_picture = COALESCE($3, profile_picture),
                updated_at = $4
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(id.0)
            .bind(changes.display_name.as_ref().map(|name| name.as_str()))
            .bind(changes.profile_picture.as_deref())
            .bind(updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Account::try_from(r),
            None => Err(AccountError::NotFound(id.to_string())),
        }
    }
}
