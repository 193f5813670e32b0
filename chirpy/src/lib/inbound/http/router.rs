use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin;
use super::handlers::create_chirp::create_chirp;
use super::handlers::create_user::create_user;
use super::handlers::delete_chirp::delete_chirp;
use super::handlers::get_chirp::get_chirp;
use super::handlers::healthz::healthz;
use super::handlers::list_chirps::list_chirps;
use super::handlers::login::login;
use super::handlers::refresh::refresh;
use super::handlers::revoke::revoke;
use super::handlers::update_user::update_user;
use super::metrics::count_file_server_hits;
use super::metrics::FileServerMetrics;
use super::middleware::authenticate as auth_middleware;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::session::ports::AuthServicePort;
use crate::domain::user::ports::UserServicePort;

pub struct AppState<US, AS, CS>
where
    US: UserServicePort,
    AS: AuthServicePort,
    CS: ChirpServicePort,
{
    pub user_service: Arc<US>,
    pub auth_service: Arc<AS>,
    pub chirp_service: Arc<CS>,
    pub metrics: Arc<FileServerMetrics>,
}

// Derived Clone would require every service to be Clone.
impl<US, AS, CS> Clone for AppState<US, AS, CS>
where
    US: UserServicePort,
    AS: AuthServicePort,
    CS: ChirpServicePort,
{
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            auth_service: Arc::clone(&self.auth_service),
            chirp_service: Arc::clone(&self.chirp_service),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

/// Build the application router.
///
/// # Arguments
/// * `static_dir` - Directory served under `/app`
/// * `request_timeout` - Deadline for every request
pub fn create_router<US, AS, CS>(
    user_service: Arc<US>,
    auth_service: Arc<AS>,
    chirp_service: Arc<CS>,
    static_dir: impl AsRef<Path>,
    request_timeout: Duration,
) -> Router
where
    US: UserServicePort,
    AS: AuthServicePort,
    CS: ChirpServicePort,
{
    let state = AppState {
        user_service,
        auth_service,
        chirp_service,
        metrics: Arc::new(FileServerMetrics::new()),
    };

    let file_server = Router::new()
        .nest_service("/app", ServeDir::new(static_dir))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state.metrics),
            count_file_server_hits,
        ));

    let admin_routes = Router::new()
        .route("/admin/metrics", get(admin::metrics::<US, AS, CS>))
        .route("/admin/reset", post(admin::reset::<US, AS, CS>));

    let public_routes = Router::new()
        .route("/api/healthz", get(healthz))
        .route("/api/users", post(create_user::<US, AS, CS>))
        .route("/api/login", post(login::<US, AS, CS>))
        .route("/api/refresh", post(refresh::<US, AS, CS>))
        .route("/api/revoke", post(revoke::<US, AS, CS>))
        .route("/api/chirps", get(list_chirps::<US, AS, CS>))
        .route("/api/chirps/:chirp_id", get(get_chirp::<US, AS, CS>));

    let protected_routes = Router::new()
        .route("/api/users", put(update_user::<US, AS, CS>))
        .route("/api/chirps", post(create_chirp::<US, AS, CS>))
        .route("/api/chirps/:chirp_id", delete(delete_chirp::<US, AS, CS>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<US, AS, CS>,
        ));

    // No `headers` field on the span: it would log Authorization values.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(file_server)
        .merge(admin_routes)
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
