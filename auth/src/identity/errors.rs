use thiserror::Error;

use crate::jwt::JwtError;

/// Failure to resolve a presented token to a known subject.
#[derive(Debug, Error)]
pub enum IdentityError<E>
where
    E: std::error::Error + 'static,
{
    /// Token was invalid or expired, or its subject no longer exists.
    #[error("Could not validate credentials: {0}")]
    Unauthenticated(String),

    /// The subject lookup itself failed.
    #[error("Subject lookup failed: {0}")]
    Lookup(#[source] E),
}

impl<E> From<JwtError> for IdentityError<E>
where
    E: std::error::Error + 'static,
{
    fn from(err: JwtError) -> Self {
        IdentityError::Unauthenticated(err.to_string())
    }
}
