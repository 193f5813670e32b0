use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::session::ports::AuthServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_chirp<US, AS, CS>(
    State(state): State<AppState<US, AS, CS>>,
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    Path(chirp_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    US: UserServicePort,
    AS: AuthServicePort,
    CS: ChirpServicePort,
{
    let chirp_id = ChirpId::from_string(&chirp_id).map_err(ChirpError::from)?;

    state
        .chirp_service
        .delete_chirp(&chirp_id, &authenticated_user.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
