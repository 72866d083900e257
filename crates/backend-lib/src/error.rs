// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::auth::{AuthHeaderError, HashingError, TokenError};
use crate::storage::StoreError;
use crate::validation::ValidationError;

/// Application error types.
///
/// Every variant maps to exactly one HTTP status.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Hashing error: {0}")]
    Hashing(#[from] HashingError),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::EmailTaken) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::UnknownUser) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) | AppError::Store(_) | AppError::Hashing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "VAL_001",
            StatusCode::UNAUTHORIZED => "AUTH_001",
            StatusCode::FORBIDDEN => "AUTH_002",
            StatusCode::NOT_FOUND => "NF_001",
            _ => "INT_001",
        }
    }

    /// Message shown to the client.
    ///
    /// Client errors carry their own message; server-side failures are only
    /// described in debug builds.
    pub fn client_message(&self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::Store(StoreError::EmailTaken) => "Email already in use".to_string(),
            AppError::Store(StoreError::UnknownUser) => "User not found".to_string(),
            _ if cfg!(debug_assertions) => self.to_string(),
            _ => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }

        let body = serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.client_message(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<AuthHeaderError> for AppError {
    fn from(err: AuthHeaderError) -> Self {
        AppError::Unauthorized(err.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => AppError::Unauthorized("Invalid token".to_string()),
            TokenError::Signing(msg) => AppError::Internal(msg),
        }
    }
}
