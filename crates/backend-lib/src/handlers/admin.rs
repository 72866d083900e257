// ============================
// crates/backend-lib/src/handlers/admin.rs
// ============================
//! Admin endpoints: visit metrics and the development reset.
use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::error::AppError;
use crate::storage::Store;
use crate::AppState;

fn render_metrics(hits: u64) -> String {
    format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    \
         <p>Chirpy has been visited {hits} times!</p>\n  </body>\n</html>"
    )
}

/// GET /admin/metrics
pub async fn metrics<S: Store>(State(state): State<Arc<AppState<S>>>) -> Html<String> {
    Html(render_metrics(state.hits.get()))
}

/// POST /admin/reset
///
/// Only on the `dev` platform. Clears the hit counter and deletes every
/// user along with their chirps and refresh tokens.
#[tracing::instrument(skip_all)]
pub async fn reset<S: Store>(State(state): State<Arc<AppState<S>>>) -> Result<String, AppError> {
    if !state.settings.is_dev() {
        return Err(AppError::Forbidden(
            "Reset is only allowed in dev environment.".to_string(),
        ));
    }

    state.hits.reset();
    let removed = state.store.delete_all_users().await?;

    tracing::warn!(removed, "database reset");
    Ok("Hits reset to 0 and database reset to initial state.".to_string())
}
