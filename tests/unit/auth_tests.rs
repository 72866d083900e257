// ========================
// tests/unit/auth_tests.rs
// ========================
//! Unit tests for the auth module
use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use backend_lib::auth::{
    access_token_ttl, get_api_key, get_bearer_token, issue_access_token, issue_access_token_at,
    make_refresh_token, validate_access_token, AuthHeaderError, PasswordHasher, TokenError,
    MAX_ACCESS_TOKEN_TTL_SECS,
};
use backend_lib::config::HasherSettings;
use chrono::{Duration, Utc};
use uuid::Uuid;

fn authorization(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    headers
}

#[tokio::test]
async fn test_password_hash_and_verify() {
    let hasher = PasswordHasher::new(&HasherSettings {
        log_n: 4,
        r: 8,
        p: 1,
    })
    .unwrap();

    let hash = hasher.hash_async("04234".to_string()).await.unwrap();
    assert_ne!(hash, "04234");
    assert!(hash.starts_with("$scrypt$"));

    assert!(hasher.verify_async(hash.clone(), "04234".to_string()).await);
    assert!(!hasher.verify_async(hash.clone(), "04235".to_string()).await);
    assert!(!hasher.verify_async("not-a-hash".to_string(), "04234".to_string()).await);

    // salted: the same password never hashes the same way twice
    let again = hasher.hash_async("04234".to_string()).await.unwrap();
    assert_ne!(hash, again);
}

#[test]
fn test_invalid_hasher_params_rejected() {
    let result = PasswordHasher::new(&HasherSettings {
        log_n: 4,
        r: 0,
        p: 1,
    });
    assert!(result.is_err());
}

#[test]
fn test_access_token_round_trip() {
    let user_id = Uuid::new_v4();
    let token = issue_access_token(user_id, "secret", Duration::minutes(5)).unwrap();
    assert_eq!(validate_access_token(&token, "secret"), Ok(user_id));
    assert_eq!(
        validate_access_token(&token, "other-secret"),
        Err(TokenError::Invalid)
    );
}

#[test]
fn test_expired_access_token_rejected() {
    let issued_at = Utc::now() - Duration::hours(2);
    let token =
        issue_access_token_at(Uuid::new_v4(), "secret", Duration::hours(1), issued_at).unwrap();
    assert_eq!(
        validate_access_token(&token, "secret"),
        Err(TokenError::Invalid)
    );
}

#[test]
fn test_access_token_ttl_is_capped() {
    let max = Duration::seconds(MAX_ACCESS_TOKEN_TTL_SECS);
    assert_eq!(access_token_ttl(None), max);
    assert_eq!(access_token_ttl(Some(0)), max);
    assert_eq!(access_token_ttl(Some(-5)), max);
    assert_eq!(access_token_ttl(Some(60)), Duration::seconds(60));
    assert_eq!(access_token_ttl(Some(86_400)), max);
    assert_eq!(access_token_ttl(Some(i64::MAX)), max);
}

#[test]
fn test_authorization_schemes() {
    assert_eq!(get_bearer_token(&authorization("Bearer abc")), Ok("abc"));
    assert_eq!(get_api_key(&authorization("ApiKey f271c8")), Ok("f271c8"));

    assert_eq!(
        get_bearer_token(&HeaderMap::new()),
        Err(AuthHeaderError::Missing)
    );
    assert_eq!(
        get_bearer_token(&authorization("ApiKey abc")),
        Err(AuthHeaderError::Malformed)
    );
    assert_eq!(
        get_api_key(&authorization("Bearer abc")),
        Err(AuthHeaderError::Malformed)
    );
    assert_eq!(
        get_bearer_token(&authorization("Bearer")),
        Err(AuthHeaderError::Malformed)
    );
    assert_eq!(
        get_bearer_token(&authorization("Bearer a b")),
        Err(AuthHeaderError::Malformed)
    );
}

#[test]
fn test_refresh_tokens_are_unique_hex() {
    let first = make_refresh_token();
    let second = make_refresh_token();
    assert_eq!(first.len(), 64);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(first, second);
}
