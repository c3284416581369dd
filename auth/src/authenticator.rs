use std::sync::Arc;

use chrono::Duration;

use crate::identity::IdentityError;
use crate::identity::IdentityResolver;
use crate::identity::SubjectLookup;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default validity window of issued tokens.
pub const DEFAULT_TOKEN_VALIDITY_DAYS: i64 = 30;

/// Authentication coordinator combining password hashing, token issuance and
/// identity resolution.
///
/// Built once at startup from the process-wide signing secret and shared
/// behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: Arc<JwtHandler>,
    identity_resolver: IdentityResolver,
    token_validity: Duration,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator issuing tokens valid for 30 days.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_token_validity(jwt_secret, Duration::days(DEFAULT_TOKEN_VALIDITY_DAYS))
    }

    /// Create a new authenticator with an explicit token validity window.
    pub fn with_token_validity(jwt_secret: &[u8], token_validity: Duration) -> Self {
        let jwt_handler = Arc::new(JwtHandler::new(jwt_secret));

        Self {
            password_hasher: PasswordHasher::new(),
            identity_resolver: IdentityResolver::new(Arc::clone(&jwt_handler)),
            jwt_handler,
            token_validity,
        }
    }

    /// Validity window applied by [`Authenticator::issue_token`].
    pub fn token_validity(&self) -> Duration {
        self.token_validity
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored digest.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identifier to embed in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token for `subject` without password verification.
    ///
    /// Used right after registration, where the caller has just proven
    /// knowledge of the password by choosing it.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, self.token_validity)
    }

    /// Validate a token and return its subject.
    ///
    /// # Errors
    /// * `InvalidToken` / `TokenExpired` - Token rejected
    pub fn validate_token(&self, token: &str) -> Result<String, JwtError> {
        self.jwt_handler.verify(token)
    }

    /// Resolve a presented token to the subject found through `lookup`.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token rejected or subject unknown
    /// * `Lookup` - Lookup failed
    pub async fn resolve<L>(
        &self,
        token: &str,
        lookup: &L,
    ) -> Result<L::Subject, IdentityError<L::Error>>
    where
        L: SubjectLookup + ?Sized,
    {
        self.identity_resolver.resolve(token, lookup).await
    }
}
