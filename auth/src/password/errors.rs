use thiserror::Error;

/// Error type for password operations.
///
/// Verification failures are deliberately uniform: an unparseable stored hash and a wrong
/// password both surface as `Mismatch`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password does not match")]
    Mismatch,
}
