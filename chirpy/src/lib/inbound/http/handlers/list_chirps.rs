use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ChirpData;
use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::ChirpOrder;
use crate::domain::chirp::models::ChirpQuery;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::session::ports::AuthServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Query string for `GET /api/chirps`: `?author_id=<uuid>&sort=asc|desc`
#[derive(Debug, Default, Deserialize)]
pub struct ListChirpsParams {
    author_id: Option<String>,
    sort: Option<String>,
}

impl ListChirpsParams {
    fn try_into_query(self) -> Result<ChirpQuery, ApiError> {
        let author_id = self
            .author_id
            .map(|id| UserId::from_string(&id))
            .transpose()
            .map_err(|e| ApiError::BadRequest(format!("Invalid author_id: {}", e)))?;

        let order = self
            .sort
            .map(|sort| sort.parse::<ChirpOrder>())
            .transpose()
            .map_err(ChirpError::from)?
            .unwrap_or_default();

        Ok(ChirpQuery { author_id, order })
    }
}

pub async fn list_chirps<US, AS, CS>(
    State(state): State<AppState<US, AS, CS>>,
    Query(params): Query<ListChirpsParams>,
) -> Result<ApiSuccess<Vec<ChirpData>>, ApiError>
where
    US: UserServicePort,
    AS: AuthServicePort,
    CS: ChirpServicePort,
{
    let query = params.try_into_query()?;

    state
        .chirp_service
        .list_chirps(query)
        .await
        .map_err(ApiError::from)
        .map(|chirps| {
            ApiSuccess::new(
                StatusCode::OK,
                chirps.iter().map(ChirpData::from).collect(),
            )
        })
}
