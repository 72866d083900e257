// ============================
// crates/backend-lib/src/extract.rs
// ============================
//! Request extractors shared by the handlers.
use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{get_bearer_token, validate_access_token};
use crate::error::AppError;
use crate::storage::Store;
use crate::AppState;

/// JSON body whose rejection is rendered as an [`AppError::BadRequest`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// The user identified by a valid `Authorization: Bearer <jwt>` header.
///
/// A missing or invalid token, or one whose subject no longer exists,
/// rejects the request with 401 before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

impl<S: Store> FromRequestParts<Arc<AppState<S>>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<S>>,
    ) -> Result<Self, Self::Rejection> {
        let token = get_bearer_token(&parts.headers)?;
        let user_id = validate_access_token(token, &state.settings.jwt_secret)?;

        // a signature outlives its user; the subject must still exist
        if state.store.get_user(user_id).await?.is_none() {
            return Err(AppError::Unauthorized("User not found".to_string()));
        }
        Ok(AuthUser(user_id))
    }
}
