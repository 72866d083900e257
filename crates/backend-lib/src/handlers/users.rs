// ============================
// crates/backend-lib/src/handlers/users.rs
// ============================
//! User registration and profile updates.
use axum::{extract::State, http::StatusCode, Json};
use chirpy_common::{User, UserCredentials};
use metrics::counter;
use std::sync::Arc;

use crate::error::AppError;
use crate::extract::{AppJson, AuthUser};
use crate::metrics::{USER_CREATED, USER_UPDATED};
use crate::storage::Store;
use crate::validation::{validate_email, validate_password};
use crate::AppState;

/// POST /api/users
#[tracing::instrument(skip_all)]
pub async fn create_user<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    AppJson(req): AppJson<UserCredentials>,
) -> Result<(StatusCode, Json<User>), AppError> {
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let hashed_password = state.hasher.hash_async(req.password).await?;
    let user = state.store.create_user(&req.email, &hashed_password).await?;

    counter!(USER_CREATED).increment(1);
    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /api/users
///
/// Replaces the caller's email and password.
#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn update_user<S: Store>(
    AuthUser(user_id): AuthUser,
    State(state): State<Arc<AppState<S>>>,
    AppJson(req): AppJson<UserCredentials>,
) -> Result<Json<User>, AppError> {
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let hashed_password = state.hasher.hash_async(req.password).await?;
    let user = state
        .store
        .update_user(user_id, &req.email, &hashed_password)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    counter!(USER_UPDATED).increment(1);
    tracing::info!("user updated");
    Ok(Json(user.into()))
}
