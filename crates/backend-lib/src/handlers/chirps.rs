// ============================
// crates/backend-lib/src/handlers/chirps.rs
// ============================
//! Chirp creation, listing and deletion.
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chirpy_common::{Chirp, CreateChirpRequest};
use metrics::counter;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::{AppJson, AuthUser};
use crate::metrics::{CHIRP_CREATED, CHIRP_DELETED};
use crate::storage::{ChirpRecord, Store};
use crate::validation::validate_chirp;
use crate::AppState;

/// Order of `GET /api/chirps` by creation time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than `desc` sorts ascending
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListChirpsParams {
    pub author_id: Option<String>,
    pub sort: Option<String>,
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Couldn't parse UUID".to_string()))
}

/// Only the author may act on a chirp
fn ensure_owner(chirp: &ChirpRecord, user_id: Uuid) -> Result<(), AppError> {
    if chirp.user_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You can't delete chirps of other users".to_string(),
        ))
    }
}

/// POST /api/chirps
#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn create_chirp<S: Store>(
    AuthUser(user_id): AuthUser,
    State(state): State<Arc<AppState<S>>>,
    AppJson(req): AppJson<CreateChirpRequest>,
) -> Result<(StatusCode, Json<Chirp>), AppError> {
    let cleaned = validate_chirp(&req.body)?;
    let chirp = state.store.create_chirp(user_id, &cleaned).await?;

    counter!(CHIRP_CREATED).increment(1);
    tracing::debug!(chirp_id = %chirp.id, "chirp created");
    Ok((StatusCode::CREATED, Json(chirp.into())))
}

/// GET /api/chirps?author_id=<uuid>&sort=asc|desc
pub async fn list_chirps<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListChirpsParams>,
) -> Result<Json<Vec<Chirp>>, AppError> {
    let author_id = params
        .author_id
        .as_deref()
        .filter(|raw| !raw.is_empty())
        .map(parse_id)
        .transpose()?;

    let mut chirps = state.store.list_chirps(author_id).await?;
    if SortOrder::from_param(params.sort.as_deref()) == SortOrder::Desc {
        chirps.reverse();
    }

    Ok(Json(chirps.into_iter().map(Chirp::from).collect()))
}

/// GET /api/chirps/{chirp_id}
pub async fn get_chirp<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(chirp_id): Path<String>,
) -> Result<Json<Chirp>, AppError> {
    let chirp_id = parse_id(&chirp_id)?;
    let chirp = state
        .store
        .get_chirp(chirp_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Chirp not found".to_string()))?;

    Ok(Json(chirp.into()))
}

/// DELETE /api/chirps/{chirp_id}
///
/// Token first, then existence, then ownership.
#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn delete_chirp<S: Store>(
    AuthUser(user_id): AuthUser,
    State(state): State<Arc<AppState<S>>>,
    Path(chirp_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let chirp_id = parse_id(&chirp_id)?;
    let chirp = state
        .store
        .get_chirp(chirp_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Chirp not found".to_string()))?;

    ensure_owner(&chirp, user_id)?;

    if !state.store.delete_chirp(chirp_id).await? {
        // deleted concurrently
        return Err(AppError::NotFound("Chirp not found".to_string()));
    }

    counter!(CHIRP_DELETED).increment(1);
    tracing::debug!(%chirp_id, "chirp deleted");
    Ok(StatusCode::NO_CONTENT)
}
