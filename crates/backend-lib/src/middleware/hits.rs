use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use std::sync::Arc;

use crate::metrics::HitCounter;

/// Count every request that reaches the wrapped service
pub async fn count_hits(
    State(hits): State<Arc<HitCounter>>,
    request: Request,
    next: Next,
) -> Response {
    let total = hits.increment();
    tracing::trace!(total, path = %request.uri().path(), "file server hit");
    next.run(request).await
}
