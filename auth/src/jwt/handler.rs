use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::claims::Claims;
use super::errors::JwtError;

/// Token codec for signed, expiring identity tokens.
///
/// Uses HS256 (HMAC with SHA-256) with one symmetric secret for both issuing
/// and verifying; every replica of a deployment must be built with the same
/// secret.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token asserting `subject`, expiring `validity` from now.
    ///
    /// # Arguments
    /// * `subject` - Account identifier to embed as `sub`
    /// * `validity` - Validity window; zero or negative yields an already expired token
    ///
    /// # Returns
    /// Compact token string (`header.payload.signature`)
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, validity: Duration) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, Utc::now(), validity);
        self.encode(&claims)
    }

    /// Verify a token and return its subject.
    ///
    /// Pure function of the token, the secret and the local wall clock. No
    /// leeway is applied: a token is accepted only while `now < exp`.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    ///
    /// # Returns
    /// Subject exactly as encoded
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, malformed structure, missing `exp` or `sub`
    /// * `TokenExpired` - Expiration instant has passed
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        let claims: Claims = self.decode(token)?;

        if claims.exp.is_none() {
            return Err(JwtError::InvalidToken("missing exp claim".to_string()));
        }

        let subject = match claims.sub {
            Some(ref sub) if !sub.is_empty() => sub.clone(),
            _ => return Err(JwtError::InvalidToken("missing sub claim".to_string())),
        };

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(subject)
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a token and check its signature and structure.
    ///
    /// Time-based claims are left to the caller; see [`JwtHandler::verify`].
    ///
    /// # Errors
    /// * `InvalidToken` - Token signature is invalid or malformed
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data = decode::<T>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

        Ok(token_data.claims)
    }
}
