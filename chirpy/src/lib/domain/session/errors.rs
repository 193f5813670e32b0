use auth::AuthenticationError;
use auth::BearerError;
use auth::JwtError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Error for login, refresh, revoke and access token checks.
///
/// Fine-grained on purpose, for logs. The HTTP layer collapses every non-internal variant
/// into one indistinguishable 401.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is missing or malformed")]
    MalformedHeader,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access token is malformed: {0}")]
    MalformedToken(String),

    #[error("Access token signature does not match")]
    BadSignature,

    #[error("Access token declares an unexpected algorithm: {0}")]
    WrongAlgorithm(String),

    #[error("Access token is expired")]
    Expired,

    #[error("Access token subject is malformed: {0}")]
    MalformedSubject(String),

    #[error("Refresh token not found")]
    TokenNotFound,

    #[error("Refresh token has been revoked")]
    TokenRevoked,

    #[error("Refresh token is expired")]
    RefreshTokenExpired,

    // Infrastructure errors
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Password hashing failure: {0}")]
    HashingFailure(String),

    #[error("Token issuance failure: {0}")]
    IssuanceFailure(String),
}

impl AuthError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MalformedHeader => "malformed_header",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::MalformedToken(_) => "malformed_token",
            AuthError::BadSignature => "bad_signature",
            AuthError::WrongAlgorithm(_) => "wrong_algorithm",
            AuthError::Expired => "expired",
            AuthError::MalformedSubject(_) => "malformed_subject",
            AuthError::TokenNotFound => "token_not_found",
            AuthError::TokenRevoked => "token_revoked",
            AuthError::RefreshTokenExpired => "refresh_token_expired",
            AuthError::PersistenceFailure(_) => "persistence_failure",
            AuthError::HashingFailure(_) => "hashing_failure",
            AuthError::IssuanceFailure(_) => "issuance_failure",
        }
    }

    /// True for failures of the service itself rather than of the caller's credentials.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AuthError::PersistenceFailure(_)
                | AuthError::HashingFailure(_)
                | AuthError::IssuanceFailure(_)
        )
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::InvalidToken(msg) => AuthError::MalformedToken(msg),
            JwtError::BadSignature => AuthError::BadSignature,
            JwtError::WrongAlgorithm(alg) => AuthError::WrongAlgorithm(alg),
            JwtError::Expired => AuthError::Expired,
            JwtError::MalformedSubject(msg) => AuthError::MalformedSubject(msg),
            JwtError::EncodingFailed(_) | JwtError::InvalidTtl(_) => {
                AuthError::IssuanceFailure(err.to_string())
            }
        }
    }
}

impl From<BearerError> for AuthError {
    fn from(_: BearerError) -> Self {
        AuthError::MalformedHeader
    }
}

impl From<AuthenticationError> for AuthError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => AuthError::HashingFailure(e.to_string()),
            AuthenticationError::JwtError(e) => AuthError::from(e),
            AuthenticationError::RefreshTokenError(e) => AuthError::IssuanceFailure(e.to_string()),
        }
    }
}

// Credential lookups can only fail for infrastructure reasons.
impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        AuthError::PersistenceFailure(err.to_string())
    }
}
