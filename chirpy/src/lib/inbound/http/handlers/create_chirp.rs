use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ChirpData;
use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::CreateChirpCommand;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::session::ports::AuthServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for posting a chirp (raw JSON)
#[derive(Deserialize)]
pub struct CreateChirpRequest {
    body: String,
}

/// The author is always the access token's subject.
pub async fn create_chirp<US, AS, CS>(
    State(state): State<AppState<US, AS, CS>>,
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateChirpRequest>,
) -> Result<ApiSuccess<ChirpData>, ApiError>
where
    US: UserServicePort,
    AS: AuthServicePort,
    CS: ChirpServicePort,
{
    let command = CreateChirpCommand {
        body: ChirpBody::new(request.body).map_err(ChirpError::from)?,
        author_id: authenticated_user.user_id,
    };

    state
        .chirp_service
        .create_chirp(command)
        .await
        .map_err(ApiError::from)
        .map(|ref chirp| ApiSuccess::new(StatusCode::CREATED, chirp.into()))
}
