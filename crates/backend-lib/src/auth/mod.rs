// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod header;
pub mod password;
pub mod refresh;
pub mod token;

pub use header::{get_api_key, get_bearer_token, AuthHeaderError};
pub use password::{verify_password, HashingError, PasswordHasher};
pub use refresh::{make_refresh_token, REFRESH_TOKEN_TTL_DAYS};
pub use token::{
    access_token_ttl, issue_access_token, issue_access_token_at, validate_access_token, Claims,
    TokenError, TokenType, MAX_ACCESS_TOKEN_TTL_SECS,
};
