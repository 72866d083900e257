// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Params, Scrypt,
};
use std::sync::Arc;
use thiserror::Error;
use zeroize::Zeroize;

use crate::auth::make_refresh_token;
use crate::config::HasherSettings;

fn hash_with(params: Params, plain: &str) -> Result<String, HashingError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, params, &salt)
        .map_err(|e| HashingError::Hash(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// Failure while producing a password hash
#[derive(Error, Debug)]
pub enum HashingError {
    #[error("invalid scrypt parameters: {0}")]
    Params(String),

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("password hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Verify a password against a hash.
///
/// A malformed hash and a wrong password both return `false`.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

/// scrypt hasher with configurable cost.
///
/// Both operations are CPU-bound, so the async variants run them on the
/// blocking pool.
#[derive(Clone, Debug)]
pub struct PasswordHasher {
    params: Params,
    /// Hash of a random secret at the same cost, verified against when
    /// there is no stored hash so a miss costs as much as a mismatch
    decoy: Arc<str>,
}

impl PasswordHasher {
    pub fn new(settings: &HasherSettings) -> Result<Self, HashingError> {
        let params = Params::new(settings.log_n, settings.r, settings.p, Params::RECOMMENDED_LEN)
            .map_err(|e| HashingError::Params(e.to_string()))?;
        let decoy = hash_with(params, &make_refresh_token())?;
        Ok(Self {
            params,
            decoy: decoy.into(),
        })
    }

    /// Hash with this hasher's cost parameters
    pub fn hash(&self, plain: &str) -> Result<String, HashingError> {
        hash_with(self.params, plain)
    }

    /// Verification reads the cost from the stored hash, not from `self`
    pub fn verify(&self, hash: &str, plain: &str) -> bool {
        verify_password(hash, plain)
    }

    /// Hash on the blocking pool and zeroize the plaintext afterwards
    pub async fn hash_async(&self, mut plain: String) -> Result<String, HashingError> {
        let params = self.params;
        tokio::task::spawn_blocking(move || {
            let result = hash_with(params, &plain);
            plain.zeroize();
            result
        })
        .await?
    }

    /// Verify on the blocking pool and zeroize the plaintext afterwards
    pub async fn verify_async(&self, hash: String, mut plain: String) -> bool {
        tokio::task::spawn_blocking(move || {
            let ok = verify_password(&hash, &plain);
            plain.zeroize();
            ok
        })
        .await
        .unwrap_or(false)
    }

    /// Spend a verification on the decoy hash; always `false`
    pub async fn verify_decoy(&self, plain: String) -> bool {
        self.verify_async(self.decoy.to_string(), plain).await;
        false
    }
}
