// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the Chirpy server.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use crate::auth::PasswordHasher;
use crate::config::Settings;
use crate::metrics::HitCounter;

pub use router::create_router;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// Settings loaded at startup
    pub settings: Arc<Settings>,
    /// Storage backend
    pub store: S,
    /// Static file server hit counter
    pub hits: Arc<HitCounter>,
    /// Password hasher configured from the settings
    pub hasher: PasswordHasher,
}

impl<S> AppState<S> {
    /// Create a new application state
    pub fn new(store: S, settings: Settings) -> anyhow::Result<Self> {
        let hasher = PasswordHasher::new(&settings.hasher)?;

        Ok(Self {
            settings: Arc::new(settings),
            store,
            hits: Arc::new(HitCounter::new()),
            hasher,
        })
    }
}
