use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token lifetime must be positive, got {0}s")]
    InvalidTtl(i64),

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token declares an unexpected algorithm: {0}")]
    WrongAlgorithm(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token subject is malformed: {0}")]
    MalformedSubject(String),
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidSignature => JwtError::BadSignature,
            ErrorKind::InvalidAlgorithm => JwtError::WrongAlgorithm(err.to_string()),
            _ => JwtError::InvalidToken(err.to_string()),
        }
    }
}
