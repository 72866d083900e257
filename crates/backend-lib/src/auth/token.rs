// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Signed, time-bound access tokens (JWT, HS256).
//!
//! Validation collapses every failure (bad signature, wrong
//! issuer, expiry, malformed subject) into [`TokenError::Invalid`].
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Longest lifetime an access token may be issued with, in seconds
pub const MAX_ACCESS_TOKEN_TTL_SECS: i64 = 3600;

/// Kinds of token the service signs; the issuer claim carries the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Access,
}

impl TokenType {
    pub fn issuer(self) -> &'static str {
        match self {
            TokenType::Access => "chirpy-access",
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Resolve the lifetime requested at login.
///
/// Absent, zero or negative requests get the maximum; larger ones are capped.
pub fn access_token_ttl(requested_secs: Option<i64>) -> Duration {
    match requested_secs {
        Some(secs) if secs > 0 => Duration::seconds(secs.min(MAX_ACCESS_TOKEN_TTL_SECS)),
        _ => Duration::seconds(MAX_ACCESS_TOKEN_TTL_SECS),
    }
}

/// Create an access token for `user_id` that expires after `ttl`
pub fn issue_access_token(user_id: Uuid, secret: &str, ttl: Duration) -> Result<String, TokenError> {
    issue_access_token_at(user_id, secret, ttl, Utc::now())
}

/// Create an access token as if issued at `issued_at`
pub fn issue_access_token_at(
    user_id: Uuid,
    secret: &str,
    ttl: Duration,
    issued_at: DateTime<Utc>,
) -> Result<String, TokenError> {
    let claims = Claims {
        iss: TokenType::Access.issuer().to_string(),
        sub: user_id.to_string(),
        iat: issued_at.timestamp(),
        exp: (issued_at + ttl).timestamp(),
    };
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Validate an access token and return the user it was issued to
pub fn validate_access_token(token: &str, secret: &str) -> Result<Uuid, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[TokenType::Access.issuer()]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| TokenError::Invalid)?;

    Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Invalid)
}
