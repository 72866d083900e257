// ============================
// crates/backend-lib/src/storage/mod.rs
// ============================
//! Storage abstraction with PostgreSQL and in-memory implementations.
use async_trait::async_trait;
use chirpy_common::{Chirp, User};
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("email address is already registered")]
    EmailTaken,

    #[error("referenced user does not exist")]
    UnknownUser,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// A user row, including the credential hash
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub hashed_password: String,
    pub is_chirpy_red: bool,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            created_at: record.created_at,
            updated_at: record.updated_at,
            email: record.email,
            is_chirpy_red: record.is_chirpy_red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ChirpRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

impl From<ChirpRecord> for Chirp {
    fn from(record: ChirpRecord) -> Self {
        Chirp {
            id: record.id,
            created_at: record.created_at,
            updated_at: record.updated_at,
            body: record.body,
            user_id: record.user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRecord {
    /// Not revoked and not yet expired at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && now < self.expires_at
    }
}

/// Persistence gateway used by the handlers.
///
/// Lookups return `Ok(None)` for absent rows; `Err` is reserved for backend
/// failures and constraint violations.
#[async_trait]
pub trait Store: Send + Sync + Clone + 'static {
    /// Insert a user; fails with [`StoreError::EmailTaken`] on a duplicate email
    async fn create_user(&self, email: &str, hashed_password: &str)
        -> Result<UserRecord, StoreError>;

    async fn get_user(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Replace a user's credentials
    async fn update_user(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<Option<UserRecord>, StoreError>;

    /// Set the premium flag and return the updated user
    async fn grant_premium(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// Delete every user together with their chirps and refresh tokens
    async fn delete_all_users(&self) -> Result<u64, StoreError>;

    /// Insert a chirp; fails with [`StoreError::UnknownUser`] if the author is gone
    async fn create_chirp(&self, user_id: Uuid, body: &str) -> Result<ChirpRecord, StoreError>;

    async fn get_chirp(&self, id: Uuid) -> Result<Option<ChirpRecord>, StoreError>;

    /// All chirps, or one author's, oldest first
    async fn list_chirps(&self, author_id: Option<Uuid>) -> Result<Vec<ChirpRecord>, StoreError>;

    /// Returns whether a chirp was deleted
    async fn delete_chirp(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord, StoreError>;

    async fn get_refresh_token(&self, token: &str)
        -> Result<Option<RefreshTokenRecord>, StoreError>;

    /// Returns whether a token was found
    async fn revoke_refresh_token(&self, token: &str) -> Result<bool, StoreError>;
}
