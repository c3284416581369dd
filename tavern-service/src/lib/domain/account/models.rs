use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::AccountIdError;
use crate::account::errors::DisplayNameError;
use crate::account::errors::EmailError;
use crate::account::errors::PasswordRuleError;
use crate::account::errors::UsernameError;

/// Account aggregate entity.
///
/// Represents a registered user of the tavern.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub username: Username,
    pub password_hash: String,
    pub display_name: String,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    ///
    /// # Returns
    /// AccountId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-20 characters of ASCII letters, digits and underscore.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 20;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 20 characters
    /// * `InvalidCharacters` - Contains anything but `[A-Za-z0-9_]`
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// The domain part is lowercased; the local part is kept as given.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let parsed = email_address::EmailAddress::from_str(&email)
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))?;

        Ok(EmailAddress(format!(
            "{}@{}",
            parsed.local_part(),
            parsed.domain().to_ascii_lowercase()
        )))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at registration.
///
/// At least 8 characters with at least one digit. Never stored; the service
/// hashes it immediately.
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    pub fn new(password: String) -> Result<Self, PasswordRuleError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordRuleError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordRuleError::MissingDigit);
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Display name value type, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 50;

    /// Trim and validate a display name.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 2 characters after trimming
    /// * `TooLong` - More than 50 characters after trimming
    pub fn new(display_name: String) -> Result<Self, DisplayNameError> {
        let trimmed = display_name.trim();
        let length = trimmed.chars().count();

        if length < Self::MIN_LENGTH {
            Err(DisplayNameError::TooShort {
                min: Self::MIN_LENGTH,
            })
        } else if length > Self::MAX_LENGTH {
            Err(DisplayNameError::TooLong {
                max: Self::MAX_LENGTH,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterAccountCommand {
    pub email: EmailAddress,
    pub username: Username,
    pub password: Password,
    pub profile_picture: Option<String>,
}

impl RegisterAccountCommand {
    /// Construct a new registration command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `username` - Validated username
    /// * `password` - Validated plain text password (will be hashed by service)
    /// * `profile_picture` - Optional picture URL or data URI
    pub fn new(
        email: EmailAddress,
        username: Username,
        password: Password,
        profile_picture: Option<String>,
    ) -> Self {
        Self {
            email,
            username,
            password,
            profile_picture,
        }
    }
}

/// Command to log in with either an email address or a username.
#[derive(Debug)]
pub struct LoginCommand {
    pub email_or_username: String,
    pub password: String,
}

/// Command to update the mutable profile fields.
///
/// Both fields are optional; only provided fields are changed.
#[derive(Debug, Default)]
pub struct UpdateProfileCommand {
    pub display_name: Option<DisplayName>,
    pub profile_picture: Option<String>,
}

impl UpdateProfileCommand {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.profile_picture.is_none()
    }
}

/// Successful registration or login: a fresh token and the account it names.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub account: Account,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_valid() {
        for name in ["abc", "hero1", "Hero_One", "a_b_c_d_e_f_g_h_i_j"] {
            assert!(Username::new(name.to_string()).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_username_length_bounds() {
        assert_eq!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        );
        assert_eq!(
            Username::new("a".repeat(21)),
            Err(UsernameError::TooLong {
                max: 20,
                actual: 21
            })
        );
        assert!(Username::new("a".repeat(20)).is_ok());
    }

    #[test]
    fn test_username_invalid_characters() {
        for name in ["hero-1", "hero one", "héros", "hero@x"] {
            assert_eq!(
                Username::new(name.to_string()),
                Err(UsernameError::InvalidCharacters),
                "{name}"
            );
        }
    }

    #[test]
    fn test_email_domain_is_lowercased() {
        let email = EmailAddress::new("Hero1@X.COM".to_string()).unwrap();
        assert_eq!(email.as_str(), "Hero1@x.com");
        assert_eq!(email, EmailAddress::new("Hero1@x.com".to_string()).unwrap());
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("hero1@x.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("".to_string()).is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(Password::new("Passw0rd".to_string()).is_ok());
        assert_eq!(
            Password::new("Pass0".to_string()).unwrap_err(),
            PasswordRuleError::TooShort { min: 8 }
        );
        assert_eq!(
            Password::new("Password".to_string()).unwrap_err(),
            PasswordRuleError::MissingDigit
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("Passw0rd".to_string()).unwrap();
        assert_eq!(format!("{:?}", password), "Password(***)");
    }

    #[test]
    fn test_display_name_trimmed() {
        let name = DisplayName::new("  Sir Hero  ".to_string()).unwrap();
        assert_eq!(name.as_str(), "Sir Hero");
    }

    #[test]
    fn test_display_name_bounds() {
        assert_eq!(
            DisplayName::new(" a ".to_string()),
            Err(DisplayNameError::TooShort { min: 2 })
        );
        assert_eq!(
            DisplayName::new("x".repeat(51)),
            Err(DisplayNameError::TooLong { max: 50 })
        );
        assert!(DisplayName::new("x".repeat(50)).is_ok());
    }

    #[test]
    fn test_account_id_roundtrip_string() {
        let id = AccountId::new();
        assert_eq!(AccountId::from_string(&id.to_string()), Ok(id));
        assert!(AccountId::from_string("not-a-uuid").is_err());
    }
}
