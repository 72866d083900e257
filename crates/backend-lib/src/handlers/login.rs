// ============================
// crates/backend-lib/src/handlers/login.rs
// ============================
//! Login and the refresh-token lifecycle.
use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use chirpy_common::{LoginRequest, LoginResponse, TokenResponse};
use chrono::{Duration, Utc};
use metrics::counter;
use std::sync::Arc;

use crate::auth::{
    access_token_ttl, get_bearer_token, issue_access_token, make_refresh_token,
    REFRESH_TOKEN_TTL_DAYS,
};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::metrics::{LOGIN_FAILED, LOGIN_SUCCEEDED, TOKEN_REFRESHED, TOKEN_REVOKED};
use crate::storage::Store;
use crate::AppState;

const BAD_CREDENTIALS: &str = "Incorrect email or password";

fn bad_credentials() -> AppError {
    counter!(LOGIN_FAILED).increment(1);
    AppError::Unauthorized(BAD_CREDENTIALS.to_string())
}

/// POST /api/login
///
/// Unknown email and wrong password are indistinguishable to the caller,
/// both pay for one password verification.
#[tracing::instrument(skip_all)]
pub async fn login<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let Some(user) = state.store.get_user_by_email(&req.email).await? else {
        state.hasher.verify_decoy(req.password).await;
        return Err(bad_credentials());
    };

    if !state
        .hasher
        .verify_async(user.hashed_password.clone(), req.password)
        .await
    {
        return Err(bad_credentials());
    }

    let ttl = access_token_ttl(req.expires_in_seconds);
    let token = issue_access_token(user.id, &state.settings.jwt_secret, ttl)?;

    let refresh_token = make_refresh_token();
    let expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);
    state
        .store
        .create_refresh_token(&refresh_token, user.id, expires_at)
        .await?;

    counter!(LOGIN_SUCCEEDED).increment(1);
    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        user: user.into(),
        token,
        refresh_token,
    }))
}

/// POST /api/refresh
///
/// Trades an active refresh token for a fresh one-hour access token.
#[tracing::instrument(skip_all)]
pub async fn refresh<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, AppError> {
    let presented = get_bearer_token(&headers)?;
    let record = state
        .store
        .get_refresh_token(presented)
        .await?
        .filter(|record| record.is_active(Utc::now()))
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    let token = issue_access_token(
        record.user_id,
        &state.settings.jwt_secret,
        access_token_ttl(None),
    )?;

    counter!(TOKEN_REFRESHED).increment(1);
    tracing::debug!(user_id = %record.user_id, "access token refreshed");
    Ok(Json(TokenResponse { token }))
}

/// POST /api/revoke
#[tracing::instrument(skip_all)]
pub async fn revoke<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let presented = get_bearer_token(&headers)?;
    if !state.store.revoke_refresh_token(presented).await? {
        return Err(AppError::Unauthorized("Invalid refresh token".to_string()));
    }

    counter!(TOKEN_REVOKED).increment(1);
    Ok(StatusCode::NO_CONTENT)
}
