//! Opaque refresh token generation.
//!
//! Tokens are 32 bytes from the operating system CSPRNG, hex encoded to 64 lowercase
//! characters. They carry no structure; all state lives in whatever store persists them.

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Random bytes per token (256 bits).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Encoded token length.
pub const REFRESH_TOKEN_LEN: usize = REFRESH_TOKEN_BYTES * 2;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Entropy source failed: {0}")]
    EntropyUnavailable(String),
}

/// Generate a new refresh token.
///
/// # Errors
/// * `EntropyUnavailable` - The operating system random source failed
pub fn generate_refresh_token() -> Result<String, RefreshTokenError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RefreshTokenError::EntropyUnavailable(e.to_string()))?;

    Ok(hex::encode(bytes))
}

/// Whether `token` has the shape of a generated refresh token.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == REFRESH_TOKEN_LEN
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
