// ============================
// crates/backend-lib/src/handlers/polka.rs
// ============================
//! Payment provider webhook.
use axum::{body::Bytes, extract::State, http::HeaderMap, http::StatusCode};
use chirpy_common::{PolkaEvent, EVENT_USER_UPGRADED};
use metrics::counter;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::get_api_key;
use crate::error::AppError;
use crate::metrics::USER_UPGRADED;
use crate::storage::Store;
use crate::AppState;

/// POST /api/polka/webhooks
///
/// The API key is checked before the body is looked at, so a bad key is
/// always 401 whatever the payload. Events other than `user.upgraded`
/// are acknowledged and ignored.
#[tracing::instrument(skip_all)]
pub async fn polka_webhook<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let key = get_api_key(&headers)?;
    if key != state.settings.polka_key {
        return Err(AppError::Unauthorized("Invalid API key".to_string()));
    }

    let event: PolkaEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Couldn't decode parameters: {e}")))?;

    if event.event != EVENT_USER_UPGRADED {
        tracing::debug!(event = %event.event, "ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = Uuid::parse_str(&event.data.user_id)
        .map_err(|_| AppError::BadRequest("Couldn't parse user_id".to_string()))?;

    state
        .store
        .grant_premium(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find user".to_string()))?;

    counter!(USER_UPGRADED).increment(1);
    tracing::info!(%user_id, "user upgraded to Chirpy Red");
    Ok(StatusCode::NO_CONTENT)
}
