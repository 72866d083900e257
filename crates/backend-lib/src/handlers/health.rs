// ============================
// crates/backend-lib/src/handlers/health.rs
// ============================
//! Liveness probe.

/// GET /api/healthz
pub async fn readiness() -> &'static str {
    "OK"
}
