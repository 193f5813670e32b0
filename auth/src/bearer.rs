use thiserror::Error;

/// Authentication scheme accepted in the `Authorization` header.
pub const BEARER_SCHEME: &str = "Bearer";

/// Error for `Authorization` header parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Authorization header must be exactly `Bearer <token>`")]
    Malformed,
}

/// Extract the raw token from an `Authorization` header value.
///
/// The value must hold exactly two whitespace-separated fields and the first must be
/// `Bearer`, compared case-insensitively.
///
/// # Errors
/// * `Missing` - Header absent or blank
/// * `Malformed` - Wrong field count or a scheme other than `Bearer`
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, BearerError> {
    let header = header
        .filter(|value| !value.trim().is_empty())
        .ok_or(BearerError::Missing)?;

    let mut fields = header.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => {
            Ok(token)
        }
        _ => Err(BearerError::Malformed),
    }
}
