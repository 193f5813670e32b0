use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::bearer_token;
use super::ApiError;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::session::ports::AuthServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn revoke<US, AS, CS>(
    State(state): State<AppState<US, AS, CS>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError>
where
    US: UserServicePort,
    AS: AuthServicePort,
    CS: ChirpServicePort,
{
    let refresh_token = bearer_token(&headers)?;

    state.auth_service.revoke(refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}
