// =========================
// tests/unit/error_tests.rs
// =========================
//! Unit tests for the error module
use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use backend_lib::error::AppError;
use backend_lib::storage::StoreError;
use chirpy_common::ErrorResponse;

#[test]
fn test_app_error_display() {
    let err = AppError::Unauthorized("Invalid token".to_string());
    assert_eq!(err.to_string(), "Unauthorized: Invalid token");

    let err = AppError::Store(StoreError::EmailTaken);
    assert!(err.to_string().contains("Storage error"));
}

#[test]
fn test_app_error_error_codes() {
    assert_eq!(AppError::BadRequest("x".to_string()).error_code(), "VAL_001");
    assert_eq!(AppError::Unauthorized("x".to_string()).error_code(), "AUTH_001");
    assert_eq!(AppError::Forbidden("x".to_string()).error_code(), "AUTH_002");
    assert_eq!(AppError::NotFound("x".to_string()).error_code(), "NF_001");
    assert_eq!(AppError::Internal("x".to_string()).error_code(), "INT_001");
    assert_eq!(AppError::Store(StoreError::EmailTaken).error_code(), "VAL_001");
}

#[test]
fn test_client_messages() {
    assert_eq!(
        AppError::NotFound("Chirp not found".to_string()).client_message(),
        "Chirp not found"
    );
    assert_eq!(
        AppError::Store(StoreError::EmailTaken).client_message(),
        "Email already in use"
    );
}

#[tokio::test]
async fn test_error_body_shape() {
    let response = AppError::BadRequest("Chirp is too long".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.error.code, "VAL_001");
    assert_eq!(body.error.message, "Chirp is too long");
}
