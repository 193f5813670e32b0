use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::errors::AuthError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LoginOutcome;
use crate::domain::session::models::RefreshOutcome;
use crate::domain::session::models::RefreshToken;
use crate::domain::user::models::UserId;

/// Port for the login / refresh / revoke flow.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and open a session.
    ///
    /// # Returns
    /// The user, a signed access token and a freshly persisted refresh token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `PersistenceFailure` - User lookup or refresh token insert failed
    /// * `HashingFailure` - Password verification could not run
    /// * `IssuanceFailure` - Token signing or generation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError>;

    /// Mint a new access token from a live refresh token.
    ///
    /// # Errors
    /// * `TokenNotFound` - No such refresh token
    /// * `TokenRevoked` - Refresh token was revoked
    /// * `RefreshTokenExpired` - Refresh token outlived its lifetime
    /// * `PersistenceFailure` - Lookup failed
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshOutcome, AuthError>;

    /// Revoke a refresh token. Revoking an already revoked token succeeds.
    ///
    /// # Errors
    /// * `TokenNotFound` - No such refresh token
    /// * `PersistenceFailure` - Update failed
    async fn revoke(&self, refresh_token: &str) -> Result<(), AuthError>;

    /// Verify an access token and return the user it was issued to.
    ///
    /// # Errors
    /// * `MalformedToken`, `BadSignature`, `WrongAlgorithm`, `Expired`, `MalformedSubject`
    async fn authenticate(&self, access_token: &str) -> Result<UserId, AuthError>;
}

/// Durable storage for refresh tokens.
///
/// Each method is a single atomic statement against the store.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Insert a new, unrevoked token.
    ///
    /// # Errors
    /// * `PersistenceFailure` - Insert failed (including a token collision)
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, AuthError>;

    /// Look a token up by its value.
    ///
    /// # Errors
    /// * `PersistenceFailure` - Query failed
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AuthError>;

    /// Mark a token revoked at `revoked_at`, keeping the first revocation time if it was
    /// already revoked. Bumps `updated_at` either way.
    ///
    /// # Errors
    /// * `TokenNotFound` - No row matched
    /// * `PersistenceFailure` - Update failed
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<(), AuthError>;
}
