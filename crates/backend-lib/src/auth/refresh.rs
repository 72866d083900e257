// ============================
// crates/backend-lib/src/auth/refresh.rs
// ============================
//! Opaque refresh tokens.
//!
//! Unlike access tokens these are persisted, expire after
//! [`REFRESH_TOKEN_TTL_DAYS`] and can be revoked.
use rand::RngCore;

/// Refresh token size in bytes (32 bytes = 256 bits of entropy)
const REFRESH_TOKEN_BYTES: usize = 32;

/// Lifetime of a refresh token
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Generate a new refresh token as lowercase hex
pub fn make_refresh_token() -> String {
    let mut buffer = [0u8; REFRESH_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut buffer);
    buffer.iter().map(|b| format!("{b:02x}")).collect()
}
