use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::session::errors::AuthError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Persisted refresh token record.
///
/// One row per login. Only revocation mutates it, and revocation is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Lifecycle state of a refresh token at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTokenStatus {
    Active,
    Expired,
    Revoked,
}

impl RefreshToken {
    /// Build a fresh, unrevoked record for a newly generated token.
    ///
    /// # Errors
    /// * `IssuanceFailure` - `issued_at + ttl` is outside the representable range
    pub fn issue(
        token: String,
        user_id: UserId,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, AuthError> {
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            AuthError::IssuanceFailure(format!("refresh token lifetime {} is out of range", ttl))
        })?;

        Ok(Self {
            token,
            user_id,
            created_at: issued_at,
            updated_at: issued_at,
            expires_at,
            revoked_at: None,
        })
    }

    /// Revocation wins over expiry.
    pub fn status(&self, now: DateTime<Utc>) -> RefreshTokenStatus {
        if self.revoked_at.is_some() {
            RefreshTokenStatus::Revoked
        } else if now >= self.expires_at {
            RefreshTokenStatus::Expired
        } else {
            RefreshTokenStatus::Active
        }
    }

    /// Usable iff unrevoked and `now < expires_at`.
    ///
    /// # Errors
    /// * `TokenRevoked` - The token was revoked, whether or not it has also expired
    /// * `RefreshTokenExpired` - The token outlived its lifetime
    pub fn ensure_usable(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        match self.status(now) {
            RefreshTokenStatus::Active => Ok(()),
            RefreshTokenStatus::Revoked => Err(AuthError::TokenRevoked),
            RefreshTokenStatus::Expired => Err(AuthError::RefreshTokenExpired),
        }
    }
}

/// Timing knobs for the session flow, fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            access_token_ttl: Duration::hours(1),
            refresh_token_ttl: Duration::days(60),
        }
    }
}

/// Raw login credentials as submitted.
///
/// Left unvalidated on purpose: a malformed email simply matches no account.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Successful refresh: a new access token only, the refresh token is not rotated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub access_token: String,
}
