// ============================
// crates/backend-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers, one module per resource.

pub mod admin;
pub mod chirps;
pub mod health;
pub mod login;
pub mod polka;
pub mod users;
