use std::fmt::Display;
use std::str::FromStr;

use chrono::Duration;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::generate_refresh_token;
use crate::refresh::RefreshTokenError;

/// Authentication coordinator combining password verification, access token signing and
/// refresh token generation.
///
/// Holds the signing secret for its whole lifetime; build one at startup and share it.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Tokens minted by a successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed JWT access token
    pub access_token: String,

    /// Opaque refresh token, not yet persisted
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),

    #[error("Refresh token error: {0}")]
    RefreshTokenError(#[from] RefreshTokenError),
}

impl From<PasswordError> for AuthenticationError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
            other => AuthenticationError::PasswordError(other),
        }
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and mint an access token plus a fresh refresh token.
    ///
    /// Password verification is deliberately slow; call this off the async executor.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity to embed in the access token
    /// * `access_token_ttl` - Access token lifetime
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    /// * `RefreshTokenError` - Entropy source failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
        access_token_ttl: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.password_hasher.verify(password, stored_hash)?;

        let access_token = self.jwt_handler.issue(subject, access_token_ttl)?;
        let refresh_token = generate_refresh_token()?;

        Ok(AuthenticationResult {
            access_token,
            refresh_token,
        })
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Pays for one Argon2 verification so the rejection takes as long as a wrong
    /// password. Same threading caveat as [`Authenticator::authenticate`].
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        match self.password_hasher.verify_decoy(password) {
            Ok(()) => AuthenticationError::InvalidCredentials,
            Err(err) => err.into(),
        }
    }

    /// Sign an access token without password verification.
    ///
    /// Used by the refresh flow, where possession of a live refresh token stands in for
    /// the password.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(
        &self,
        subject: impl ToString,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, ttl)
    }

    /// Validate an access token and parse its subject.
    ///
    /// # Errors
    /// * `JwtError` - Token validation failed or the subject is malformed
    pub fn validate_token<T>(&self, token: &str) -> Result<T, JwtError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.jwt_handler.verify_subject(token)
    }
}
