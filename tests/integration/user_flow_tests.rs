// ==================================
// tests/integration/user_flow_tests.rs
// ==================================
//! Registration and profile updates through the HTTP API
use crate::test_utils::{TestApp, PASSWORD};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_create_user() {
    let app = TestApp::new();
    let response = app
        .post_json(
            "/api/users",
            json!({ "email": "walt@breakingbad.com", "password": PASSWORD }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["email"], "walt@breakingbad.com");
    assert_eq!(response.body["is_chirpy_red"], false);
    assert!(response.body["id"].is_string());
    assert!(response.body["created_at"].is_string());
    assert!(response.body["updated_at"].is_string());
    assert!(response.body.get("password").is_none());
    assert!(response.body.get("hashed_password").is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let app = TestApp::new();
    app.create_user("walt@breakingbad.com").await;

    let response = app
        .post_json(
            "/api/users",
            json!({ "email": "walt@breakingbad.com", "password": "other" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["message"], "Email already in use");
}

#[tokio::test]
async fn test_create_user_rejects_bad_input() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/users", json!({ "email": "nope", "password": PASSWORD }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .post_json("/api/users", json!({ "email": "a@example.com", "password": "" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .send(
            Method::POST,
            "/api/users",
            None,
            Some("{not json".to_string()),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "VAL_001");
}

#[tokio::test]
async fn test_update_user() {
    let app = TestApp::new();
    let login = app.signed_up("walt@breakingbad.com").await;

    let response = app
        .send_bearer(
            Method::PUT,
            "/api/users",
            &login.token,
            Some(json!({ "email": "heisenberg@breakingbad.com", "password": "losPollos" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "heisenberg@breakingbad.com");
    assert_eq!(response.body["id"], login.user.id.to_string());

    // the old credentials no longer work, the new ones do
    let response = app
        .post_json(
            "/api/login",
            json!({ "email": "walt@breakingbad.com", "password": PASSWORD }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .post_json(
            "/api/login",
            json!({ "email": "heisenberg@breakingbad.com", "password": "losPollos" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_user_requires_token() {
    let app = TestApp::new();
    let body = json!({ "email": "a@example.com", "password": "pw" }).to_string();

    let response = app
        .send(Method::PUT, "/api/users", None, Some(body.clone()))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .send(
            Method::PUT,
            "/api/users",
            Some("Bearer not.a.jwt"),
            Some(body),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_to_taken_email_rejected() {
    let app = TestApp::new();
    app.create_user("jesse@breakingbad.com").await;
    let login = app.signed_up("walt@breakingbad.com").await;

    let response = app
        .send_bearer(
            Method::PUT,
            "/api/users",
            &login.token,
            Some(json!({ "email": "jesse@breakingbad.com", "password": "pw" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
