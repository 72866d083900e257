// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between Chirpy clients and the server.
//! This module defines the JSON request and response bodies of the REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Webhook event that grants the premium flag
pub const EVENT_USER_UPGRADED: &str = "user.upgraded";

/// A registered user as seen by clients.
/// The password hash never leaves the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    /// Premium ("Chirpy Red") entitlement
    pub is_chirpy_red: bool,
}

/// A short text post
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Chirp {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

/// Body of `POST /api/users` and `PUT /api/users`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserCredentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/login`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Requested access token lifetime; capped server side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in_seconds: Option<i64>,
}

/// Response to a successful login
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: User,
    /// Signed access token (JWT)
    pub token: String,
    /// Opaque long-lived refresh token
    pub refresh_token: String,
}

/// Response of `POST /api/refresh`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub token: String,
}

/// Body of `POST /api/chirps`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateChirpRequest {
    pub body: String,
}

/// Payment provider event delivered to `POST /api/polka/webhooks`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PolkaEvent {
    pub event: String,
    #[serde(default)]
    pub data: PolkaEventData,
}

/// Payload of a [`PolkaEvent`]
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PolkaEventData {
    #[serde(default)]
    pub user_id: String,
}

/// Structured error body returned by every failing endpoint
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
