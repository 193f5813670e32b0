use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;

use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::session::ports::AuthServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn metrics<US, AS, CS>(State(state): State<AppState<US, AS, CS>>) -> Html<String>
where
    US: UserServicePort,
    AS: AuthServicePort,
    CS: ChirpServicePort,
{
    Html(render_metrics(state.metrics.hits()))
}

/// Zero the file server hit counter.
pub async fn reset<US, AS, CS>(
    State(state): State<AppState<US, AS, CS>>,
) -> (StatusCode, String)
where
    US: UserServicePort,
    AS: AuthServicePort,
    CS: ChirpServicePort,
{
    state.metrics.reset();
    tracing::info!("File server hit counter reset");

    (StatusCode::OK, format!("Hits: {}", state.metrics.hits()))
}

fn render_metrics(hits: u64) -> String {
    format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    <p>Chirpy has been visited {} times!</p>\n  </body>\n</html>\n",
        hits
    )
}
