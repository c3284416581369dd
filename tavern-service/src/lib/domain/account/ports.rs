use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AuthSession;
use crate::account::models::LoginCommand;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::UpdateProfileCommand;
use crate::account::models::Username;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and sign it in.
    ///
    /// # Arguments
    /// * `command` - Validated email, username, password and optional picture
    ///
    /// # Returns
    /// Token for the new account plus the account itself
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<AuthSession, AccountError>;

    /// Sign in with an email address or a username.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or wrong password (indistinguishable)
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AccountError>;

    /// Resolve a presented bearer token to the account it names.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token invalid or expired, or account gone or inactive
    /// * `DatabaseError` - Database operation failed
    async fn resolve_identity(&self, token: &str) -> Result<Account, AccountError>;

    /// Update display name and/or profile picture of `account`.
    ///
    /// # Returns
    /// The account as stored after the update
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        account: &Account,
        command: UpdateProfileCommand,
    ) -> Result<Account, AccountError>;
}

/// Account directory: persistence operations for the account aggregate.
///
/// Every lookup is keyed and returns at most one record.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist new account to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Account>, AccountError>;

    /// Overwrite the mutable profile fields that are present in `changes`.
    ///
    /// # Arguments
    /// * `id` - Account to update
    /// * `changes` - Fields to set; absent fields keep their value
    /// * `updated_at` - New modification timestamp
    ///
    /// # Returns
    /// The account as stored after the update
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &AccountId,
        changes: &UpdateProfileCommand,
        updated_at: DateTime<Utc>,
    ) -> Result<Account, AccountError>;
}
