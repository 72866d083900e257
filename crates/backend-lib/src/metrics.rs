// ==============
// crates/backend-lib/src/metrics.rs

//! Request hit counter and the metric keys emitted through the `metrics` facade.
use std::sync::atomic::{AtomicU64, Ordering};

pub const APP_HITS: &str = "app.hits";
pub const USER_CREATED: &str = "user.created";
pub const USER_UPDATED: &str = "user.updated";
pub const USER_UPGRADED: &str = "user.upgraded";
pub const LOGIN_SUCCEEDED: &str = "login.succeeded";
pub const LOGIN_FAILED: &str = "login.failed";
pub const CHIRP_CREATED: &str = "chirp.created";
pub const CHIRP_DELETED: &str = "chirp.deleted";
pub const TOKEN_REFRESHED: &str = "token.refreshed";
pub const TOKEN_REVOKED: &str = "token.revoked";

/// Counts requests to the static file server.
///
/// One instance lives in the application state for the lifetime of the
/// server; the admin reset sets it back to zero.
#[derive(Debug, Default)]
pub struct HitCounter {
    hits: AtomicU64,
}

impl HitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one hit and return the new total
    pub fn increment(&self) -> u64 {
        metrics::counter!(APP_HITS).increment(1);
        self.hits.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }
}
