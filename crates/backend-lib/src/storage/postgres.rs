//! PostgreSQL store.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use super::{ChirpRecord, RefreshTokenRecord, Store, StoreError, UserRecord};

const MAX_CONNECTIONS: u32 = 10;

const USER_COLUMNS: &str = "id, created_at, updated_at, email, hashed_password, is_chirpy_red";
const CHIRP_COLUMNS: &str = "id, created_at, updated_at, body, user_id";
const REFRESH_TOKEN_COLUMNS: &str =
    "token, created_at, updated_at, user_id, expires_at, revoked_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a PostgreSQL connection pool
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply the bundled migrations
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

/// Translate constraint violations into their domain errors
fn map_constraint(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::EmailTaken;
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::UnknownUser;
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(
        &self,
        email: &str,
        hashed_password: &str,
    ) -> Result<UserRecord, StoreError> {
        let sql = format!(
            "INSERT INTO users (id, created_at, updated_at, email, hashed_password) \
             VALUES ($1, NOW(), NOW(), $2, $3) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, UserRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(email)
            .bind(hashed_password)
            .fetch_one(&self.pool)
            .await
            .map_err(map_constraint)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_user(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let sql = format!(
            "UPDATE users SET email = $2, hashed_password = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id)
            .bind(email)
            .bind(hashed_password)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_constraint)
    }

    async fn grant_premium(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let sql = format!(
            "UPDATE users SET is_chirpy_red = TRUE, updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_all_users(&self) -> Result<u64, StoreError> {
        // chirps and refresh tokens go with their users (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn create_chirp(&self, user_id: Uuid, body: &str) -> Result<ChirpRecord, StoreError> {
        let sql = format!(
            "INSERT INTO chirps (id, created_at, updated_at, body, user_id) \
             VALUES ($1, NOW(), NOW(), $2, $3) RETURNING {CHIRP_COLUMNS}"
        );
        sqlx::query_as::<_, ChirpRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(body)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_constraint)
    }

    async fn get_chirp(&self, id: Uuid) -> Result<Option<ChirpRecord>, StoreError> {
        let sql = format!("SELECT {CHIRP_COLUMNS} FROM chirps WHERE id = $1");
        let row = sqlx::query_as::<_, ChirpRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_chirps(&self, author_id: Option<Uuid>) -> Result<Vec<ChirpRecord>, StoreError> {
        let sql = format!(
            "SELECT {CHIRP_COLUMNS} FROM chirps \
             WHERE $1::uuid IS NULL OR user_id = $1 \
             ORDER BY created_at ASC"
        );
        let rows = sqlx::query_as::<_, ChirpRecord>(&sql)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn delete_chirp(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM chirps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord, StoreError> {
        let sql = format!(
            "INSERT INTO refresh_tokens (token, created_at, updated_at, user_id, expires_at) \
             VALUES ($1, NOW(), NOW(), $2, $3) RETURNING {REFRESH_TOKEN_COLUMNS}"
        );
        sqlx::query_as::<_, RefreshTokenRecord>(&sql)
            .bind(token)
            .bind(user_id)
            .bind(expires_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_constraint)
    }

    async fn get_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, StoreError> {
        let sql = format!("SELECT {REFRESH_TOKEN_COLUMNS} FROM refresh_tokens WHERE token = $1");
        let row = sqlx::query_as::<_, RefreshTokenRecord>(&sql)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = NOW(), updated_at = NOW() WHERE token = $1",
        )
        .bind(token)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
