// ============================
// crates/backend-lib/src/auth/header.rs
// ============================
//! Credential extraction from the `Authorization` header.
use axum::http::{header::AUTHORIZATION, HeaderMap};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthHeaderError {
    #[error("authorization header is missing")]
    Missing,

    #[error("malformed authorization header")]
    Malformed,
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn get_bearer_token(headers: &HeaderMap) -> Result<&str, AuthHeaderError> {
    scheme_credential(headers, "Bearer")
}

/// Extract the key from `Authorization: ApiKey <key>`
pub fn get_api_key(headers: &HeaderMap) -> Result<&str, AuthHeaderError> {
    scheme_credential(headers, "ApiKey")
}

/// The header must be exactly two space-separated parts, the scheme then a
/// non-empty credential.
fn scheme_credential<'a>(headers: &'a HeaderMap, scheme: &str) -> Result<&'a str, AuthHeaderError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthHeaderError::Missing)?
        .to_str()
        .map_err(|_| AuthHeaderError::Malformed)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(found), Some(credential), None) if found == scheme && !credential.is_empty() => {
            Ok(credential)
        },
        _ => Err(AuthHeaderError::Malformed),
    }
}
