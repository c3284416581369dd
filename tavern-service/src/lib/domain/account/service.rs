use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::SubjectLookup;
use chrono::Utc;

use crate::account::avatar::generate_default_avatar;
use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AuthSession;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::UpdateProfileCommand;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
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
    /// * `repository` - Account directory implementation
    /// * `authenticator` - Password hashing and token handling
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn start_session(&self, account: Account) -> Result<AuthSession, AccountError> {
        let access_token = self.authenticator.issue_token(&account.id.to_string())?;
        Ok(AuthSession {
            access_token,
            account,
        })
    }

    async fn find_by_email_or_username(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, AccountError> {
        let email = EmailAddress::new(identifier.to_string())
            .map(|email| email.as_str().to_string())
            .unwrap_or_else(|_| identifier.to_string());

        if let Some(account) = self.repository.find_by_email(&email).await? {
            return Ok(Some(account));
        }

        // An identifier that cannot be a username cannot match one.
        match Username::new(identifier.to_string()) {
            Ok(username) => self.repository.find_by_username(&username).await,
            Err(_) => Ok(None),
        }
    }
}

/// Looks up token subjects in the account directory.
///
/// Subjects that are not account ids, and inactive accounts, resolve to
/// nothing.
struct ActiveAccountLookup<'a, AR>(&'a AR);

#[async_trait]
impl<'a, AR> SubjectLookup for ActiveAccountLookup<'a, AR>
where
    AR: AccountRepository,
{
    type Subject = Account;
    type Error = AccountError;

    async fn find_subject(&self, subject_id: &str) -> Result<Option<Account>, AccountError> {
        let Ok(id) = AccountId::from_string(subject_id) else {
            return Ok(None);
        };

        Ok(self
            .0
            .find_by_id(&id)
            .await?
            .filter(|account| account.is_active))
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<AuthSession, AccountError> {
        let RegisterAccountCommand {
            email,
            username,
            password,
            profile_picture,
        } = command;

        if self.repository.find_by_email(email.as_str()).await?.is_some() {
            return Err(AccountError::EmailAlreadyExists(email.to_string()));
        }

        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(AccountError::UsernameAlreadyExists(username.to_string()));
        }

        let profile_picture = profile_picture
            .filter(|picture| !picture.trim().is_empty())
            .unwrap_or_else(|| generate_default_avatar(username.as_str()));

        let password_hash = self.authenticator.hash_password(password.as_str())?;

        let now = Utc::now();
        let account = Account {
            id: AccountId::new(),
            display_name: username.as_str().to_string(),
            email,
            username,
            password_hash,
            profile_picture: Some(profile_picture),
            created_at: now,
            updated_at: now,
            is_active: true,
        };

        let created = self.repository.create(account).await?;
        tracing::info!(account_id = %created.id, username = %created.username, "Account registered");

        self.start_session(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AccountError> {
        let account = self
            .find_by_email_or_username(&command.email_or_username)
            .await?
            .filter(|account| account.is_active);

        let Some(account) = account else {
            tracing::warn!("Login rejected: unknown or inactive account");
            return Err(AccountError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                &account.password_hash,
                &account.id.to_string(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(account_id = %account.id, "Login rejected: wrong password");
                    AccountError::InvalidCredentials
                }
                AuthenticationError::JwtError(err) => AccountError::from(err),
            })?;

        tracing::debug!(account_id = %account.id, "Login succeeded");

        Ok(AuthSession {
            access_token: result.access_token,
            account,
        })
    }

    async fn resolve_identity(&self, token: &str) -> Result<Account, AccountError> {
        let lookup = ActiveAccountLookup(self.repository.as_ref());
        Ok(self.authenticator.resolve(token, &lookup).await?)
    }

    async fn update_profile(
        &self,
        account: &Account,
        command: UpdateProfileCommand,
    ) -> Result<Account, AccountError> {
        if command.is_empty() {
            return Ok(account.clone());
        }

        let updated = self
            .repository
            .update_profile(&account.id, &command, Utc::now())
            .await?;
        tracing::debug!(account_id = %updated.id, "Profile updated");

        Ok(updated)
    }
}
