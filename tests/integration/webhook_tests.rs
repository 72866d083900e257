// ================================
// tests/integration/webhook_tests.rs
// ================================
//! Payment provider webhook
use crate::test_utils::{TestApp, POLKA_KEY};
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

async fn deliver(app: &TestApp, authorization: Option<&str>, body: Value) -> StatusCode {
    app.send(
        Method::POST,
        "/api/polka/webhooks",
        authorization,
        Some(body.to_string()),
    )
    .await
    .status
}

fn api_key() -> String {
    format!("ApiKey {POLKA_KEY}")
}

#[tokio::test]
async fn test_upgrade_grants_premium() {
    let app = TestApp::new();
    let login = app.signed_up("walt@breakingbad.com").await;
    assert!(!login.user.is_chirpy_red);

    let status = deliver(
        &app,
        Some(&api_key()),
        json!({ "event": "user.upgraded", "data": { "user_id": login.user.id } }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let login = app.login("walt@breakingbad.com").await;
    assert!(login.user.is_chirpy_red);

    // replaying the event is harmless
    let status = deliver(
        &app,
        Some(&api_key()),
        json!({ "event": "user.upgraded", "data": { "user_id": login.user.id } }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_other_events_ignored() {
    let app = TestApp::new();
    let login = app.signed_up("walt@breakingbad.com").await;

    let status = deliver(
        &app,
        Some(&api_key()),
        json!({ "event": "user.payment_failed", "data": { "user_id": login.user.id } }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let login = app.login("walt@breakingbad.com").await;
    assert!(!login.user.is_chirpy_red);
}

#[tokio::test]
async fn test_unknown_user() {
    let app = TestApp::new();
    let status = deliver(
        &app,
        Some(&api_key()),
        json!({ "event": "user.upgraded", "data": { "user_id": Uuid::new_v4() } }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let status = deliver(
        &app,
        Some(&api_key()),
        json!({ "event": "user.upgraded", "data": { "user_id": "not-a-uuid" } }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_key_checked_first() {
    let app = TestApp::new();
    let login = app.signed_up("walt@breakingbad.com").await;
    let upgrade = json!({ "event": "user.upgraded", "data": { "user_id": login.user.id } });

    assert_eq!(deliver(&app, None, upgrade.clone()).await, StatusCode::UNAUTHORIZED);
    assert_eq!(
        deliver(&app, Some("ApiKey wrong-key"), upgrade.clone()).await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        deliver(&app, Some(&format!("Bearer {POLKA_KEY}")), upgrade).await,
        StatusCode::UNAUTHORIZED
    );

    // a bad key wins over a bad body
    let response = app
        .send(
            Method::POST,
            "/api/polka/webhooks",
            Some("ApiKey wrong-key"),
            Some("{broken".to_string()),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .send(
            Method::POST,
            "/api/polka/webhooks",
            Some(&api_key()),
            Some("{broken".to_string()),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let login = app.login("walt@breakingbad.com").await;
    assert!(!login.user.is_chirpy_red);
}
