use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::session::errors::AuthError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LoginOutcome;
use crate::domain::session::models::RefreshOutcome;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::SessionSettings;
use crate::domain::session::ports::AuthServicePort;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service implementing login, refresh, revoke and access token checks.
///
/// Stateless apart from the injected repositories and the immutable authenticator, so a
/// single instance is shared by every request.
pub struct AuthService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    user_repository: Arc<UR>,
    refresh_token_repository: Arc<TR>,
    authenticator: Arc<Authenticator>,
    settings: SessionSettings,
}

impl<UR, TR> AuthService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_repository` - Credential lookup
    /// * `refresh_token_repository` - Refresh token persistence
    /// * `authenticator` - Password hasher and token signer, keyed by the process secret
    /// * `settings` - Access and refresh token lifetimes
    pub fn new(
        user_repository: Arc<UR>,
        refresh_token_repository: Arc<TR>,
        authenticator: Arc<Authenticator>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            user_repository,
            refresh_token_repository,
            authenticator,
            settings,
        }
    }

    async fn usable_refresh_token(&self, token: &str) -> Result<RefreshToken, AuthError> {
        if !auth::refresh::is_well_formed(token) {
            return Err(AuthError::TokenNotFound);
        }

        let record = self
            .refresh_token_repository
            .find_by_token(token)
            .await?
            .ok_or(AuthError::TokenNotFound)?;

        record.ensure_usable(Utc::now())?;
        Ok(record)
    }
}

#[async_trait]
impl<UR, TR> AuthServicePort for AuthService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);

        let Some(user) = self.user_repository.find_by_email(&command.email).await? else {
            // Unknown emails pay for one verification too, so timing does not reveal
            // which addresses are registered.
            let err = tokio::task::spawn_blocking(move || {
                authenticator.reject_unknown(&command.password)
            })
            .await
            .map_err(|e| AuthError::HashingFailure(e.to_string()))?;
            return Err(err.into());
        };

        let stored_hash = user.password_hash.clone();
        let user_id = user.id;
        let access_token_ttl = self.settings.access_token_ttl;

        // Verification is the expensive part; keep it off the async workers.
        let tokens = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&command.password, &stored_hash, user_id, access_token_ttl)
        })
        .await
        .map_err(|e| AuthError::HashingFailure(e.to_string()))??;

        let record = RefreshToken::issue(
            tokens.refresh_token,
            user.id,
            Utc::now(),
            self.settings.refresh_token_ttl,
        )?;
        let record = self.refresh_token_repository.create(record).await?;

        tracing::info!(
            user_id = %user.id,
            refresh_token_expires_at = %record.expires_at,
            "User logged in"
        );

        Ok(LoginOutcome {
            user,
            access_token: tokens.access_token,
            refresh_token: record.token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshOutcome, AuthError> {
        let record = self.usable_refresh_token(refresh_token).await?;

        let access_token = self
            .authenticator
            .generate_token(record.user_id, self.settings.access_token_ttl)?;

        tracing::debug!(user_id = %record.user_id, "Access token refreshed");

        Ok(RefreshOutcome { access_token })
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), AuthError> {
        if !auth::refresh::is_well_formed(refresh_token) {
            return Err(AuthError::TokenNotFound);
        }

        self.refresh_token_repository
            .revoke(refresh_token, Utc::now())
            .await?;

        tracing::info!("Refresh token revoked");
        Ok(())
    }

    async fn authenticate(&self, access_token: &str) -> Result<UserId, AuthError> {
        self.authenticator
            .validate_token::<UserId>(access_token)
            .map_err(AuthError::from)
    }
}
