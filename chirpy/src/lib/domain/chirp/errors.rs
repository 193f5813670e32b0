use thiserror::Error;

/// Error for ChirpId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChirpIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for ChirpBody validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChirpBodyError {
    #[error("Chirp is too long: {length} characters, at most {max} allowed")]
    TooLong { length: usize, max: usize },
}

/// Error for unrecognised list orderings
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChirpOrderError {
    #[error("Unknown sort order: {0} (expected asc or desc)")]
    Unknown(String),
}

/// Top-level error for all chirp operations
#[derive(Debug, Clone, Error)]
pub enum ChirpError {
    #[error("Invalid chirp ID: {0}")]
    InvalidChirpId(#[from] ChirpIdError),

    #[error("Invalid chirp: {0}")]
    InvalidBody(#[from] ChirpBodyError),

    #[error("Invalid sort order: {0}")]
    InvalidOrder(#[from] ChirpOrderError),

    #[error("Chirp not found: {0}")]
    NotFound(String),

    #[error("Chirp {0} belongs to another user")]
    NotAuthor(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
