use std::sync::Arc;

use async_trait::async_trait;

use super::errors::IdentityError;
use crate::jwt::JwtHandler;

/// Capability to fetch the subject a token refers to.
///
/// Implemented by each service over its own account store. Returning
/// `Ok(None)` means "no such subject", which the resolver turns into an
/// authentication failure.
#[async_trait]
pub trait SubjectLookup: Send + Sync {
    type Subject: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn find_subject(&self, subject_id: &str) -> Result<Option<Self::Subject>, Self::Error>;
}

/// Resolves presented bearer tokens to authenticated subjects.
///
/// Every call verifies the token and fetches the subject again; nothing is
/// cached, so a subject removed from the store stops authenticating on the
/// very next request.
#[derive(Clone)]
pub struct IdentityResolver {
    jwt_handler: Arc<JwtHandler>,
}

impl IdentityResolver {
    pub fn new(jwt_handler: Arc<JwtHandler>) -> Self {
        Self { jwt_handler }
    }

    /// Resolve `token` through `lookup`.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token failed verification, or its subject does not exist
    /// * `Lookup` - The lookup capability itself failed
    pub async fn resolve<L>(
        &self,
        token: &str,
        lookup: &L,
    ) -> Result<L::Subject, IdentityError<L::Error>>
    where
        L: SubjectLookup + ?Sized,
    {
        let subject_id = self.jwt_handler.verify(token)?;

        lookup
            .find_subject(&subject_id)
            .await
            .map_err(IdentityError::Lookup)?
            .ok_or_else(|| IdentityError::Unauthenticated(format!("unknown subject {subject_id}")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use chrono::Duration;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[derive(Debug, thiserror::Error)]
    #[error("store offline")]
    struct StoreOffline;

    struct FakeDirectory {
        accounts: HashMap<String, String>,
        offline: bool,
        calls: AtomicUsize,
    }

    impl FakeDirectory {
        fn with(accounts: &[(&str, &str)]) -> Self {
            Self {
                accounts: accounts
                    .iter()
                    .map(|(id, name)| (id.to_string(), name.to_string()))
                    .collect(),
                offline: false,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SubjectLookup for FakeDirectory {
        type Subject = String;
        type Error = StoreOffline;

        async fn find_subject(&self, subject_id: &str) -> Result<Option<String>, StoreOffline> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.offline {
                return Err(StoreOffline);
            }
            Ok(self.accounts.get(subject_id).cloned())
        }
    }

    fn resolver() -> (IdentityResolver, Arc<JwtHandler>) {
        let handler = Arc::new(JwtHandler::new(SECRET));
        (IdentityResolver::new(Arc::clone(&handler)), handler)
    }

    #[tokio::test]
    async fn test_resolve_known_subject() {
        let (resolver, handler) = resolver();
        let directory = FakeDirectory::with(&[("id-1", "hero1")]);

        let token = handler.issue("id-1", Duration::days(30)).unwrap();
        let account = resolver.resolve(&token, &directory).await.unwrap();

        assert_eq!(account, "hero1");
    }

    #[tokio::test]
    async fn test_resolve_refetches_every_call() {
        let (resolver, handler) = resolver();
        let directory = FakeDirectory::with(&[("id-1", "hero1")]);
        let token = handler.issue("id-1", Duration::days(30)).unwrap();

        resolver.resolve(&token, &directory).await.unwrap();
        resolver.resolve(&token, &directory).await.unwrap();

        assert_eq!(directory.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_resolve_unknown_subject() {
        let (resolver, handler) = resolver();
        let directory = FakeDirectory::with(&[("id-1", "hero1")]);

        let token = handler.issue("id-2", Duration::days(30)).unwrap();
        let result = resolver.resolve(&token, &directory).await;

        assert!(matches!(result, Err(IdentityError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn test_resolve_wrong_signature() {
        let (resolver, _) = resolver();
        let foreign = JwtHandler::new(b"another_secret_key_at_least_32_bytes");
        let directory = FakeDirectory::with(&[("id-1", "hero1")]);

        let token = foreign.issue("id-1", Duration::days(30)).unwrap();
        let result = resolver.resolve(&token, &directory).await;

        assert!(matches!(result, Err(IdentityError::Unauthenticated(_))));
        assert_eq!(directory.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolve_expired_token() {
        let (resolver, handler) = resolver();
        let directory = FakeDirectory::with(&[("id-1", "hero1")]);

        let token = handler.issue("id-1", Duration::zero()).unwrap();
        let result = resolver.resolve(&token, &directory).await;

        assert!(matches!(result, Err(IdentityError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn test_resolve_lookup_failure() {
        let (resolver, handler) = resolver();
        let mut directory = FakeDirectory::with(&[("id-1", "hero1")]);
        directory.offline = true;

        let token = handler.issue("id-1", Duration::days(30)).unwrap();
        let result = resolver.resolve(&token, &directory).await;

        assert!(matches!(result, Err(IdentityError::Lookup(StoreOffline))));
    }
}
