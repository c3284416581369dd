//! Authentication core
//!
//! - Password hashing (Argon2id)
//! - Signed, expiring identity tokens (HS256 JWT)
//! - Identity resolution: token to subject to stored account
//!
//! Services plug in their own account store through [`SubjectLookup`]; the
//! library never talks to storage itself.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password1").unwrap();
//! assert!(hasher.verify("my_password1", &hash));
//! assert!(!hasher.verify("other_password1", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue("account-42", Duration::days(30)).unwrap();
//! assert_eq!(handler.verify(&token).unwrap(), "account-42");
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "account-42").unwrap();
//!
//! // Later requests: validate token
//! let subject = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(subject, "account-42");
//! ```

pub mod authenticator;
pub mod identity;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use identity::IdentityError;
pub use identity::IdentityResolver;
pub use identity::SubjectLookup;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
