// ============================
// crates/backend-lib/src/router.rs
// ============================
/** HTTP router for the Chirpy server.
Mounts the JSON API under `/api`, the admin endpoints under `/admin`
and the hit-counted static file server under `/app`. */
use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::handlers::{admin, chirps, health, login, polka, users};
use crate::middleware::count_hits;
use crate::storage::Store;
use crate::AppState;

/// Create the application router
pub fn create_router<S: Store>(state: Arc<AppState<S>>) -> Router {
    let file_server = from_fn_with_state(state.hits.clone(), count_hits)
        .layer(ServeDir::new(&state.settings.filepath_root));
    let timeout = Duration::from_secs(state.settings.request_timeout_secs);

    Router::new()
        .nest("/api", api_routes())
        .nest("/admin", admin_routes())
        .nest_service("/app", file_server)
        .layer(timeout_layer(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Requests running longer than `timeout` are answered with 408
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

fn api_routes<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/healthz", get(health::readiness))
        .route("/users", post(users::create_user::<S>).put(users::update_user::<S>))
        .route("/login", post(login::login::<S>))
        .route("/refresh", post(login::refresh::<S>))
        .route("/revoke", post(login::revoke::<S>))
        .route(
            "/chirps",
            post(chirps::create_chirp::<S>).get(chirps::list_chirps::<S>),
        )
        .route(
            "/chirps/{chirp_id}",
            get(chirps::get_chirp::<S>).delete(chirps::delete_chirp::<S>),
        )
        .route("/polka/webhooks", post(polka::polka_webhook::<S>))
}

fn admin_routes<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/metrics", get(admin::metrics::<S>))
        .route("/reset", post(admin::reset::<S>))
}
