use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::bearer_token;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::session::ports::AuthServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Trade the refresh token in the `Authorization` header for a new access token.
pub async fn refresh<US, AS, CS>(
    State(state): State<AppState<US, AS, CS>>,
    headers: HeaderMap,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError>
where
    US: UserServicePort,
    AS: AuthServicePort,
    CS: ChirpServicePort,
{
    let refresh_token = bearer_token(&headers)?;

    state
        .auth_service
        .refresh(refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|outcome| {
            ApiSuccess::new(
                StatusCode::OK,
                RefreshResponseData {
                    token: outcome.access_token,
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
}
