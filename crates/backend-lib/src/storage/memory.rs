//! In-memory store for tests and database-less runs.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::{ChirpRecord, RefreshTokenRecord, Store, StoreError, UserRecord};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, UserRecord>,
    /// Insertion order, which is creation order
    chirps: Vec<ChirpRecord>,
}

/// Users and chirps share one lock so email uniqueness and the
/// chirp-to-user reference are checked atomically with the write.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    refresh_tokens: Arc<DashMap<String, RefreshTokenRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(
        &self,
        email: &str,
        hashed_password: &str,
    ) -> Result<UserRecord, StoreError> {
        let mut tables = self.tables.write();
        if tables.users.values().any(|u| u.email == email) {
            return Err(StoreError::EmailTaken);
        }

        let now = Utc::now();
        let user = UserRecord {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            is_chirpy_red: false,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_user(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let mut tables = self.tables.write();
        if tables.users.values().any(|u| u.email == email && u.id != id) {
            return Err(StoreError::EmailTaken);
        }

        Ok(tables.users.get_mut(&id).map(|user| {
            user.email = email.to_string();
            user.hashed_password = hashed_password.to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn grant_premium(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let mut tables = self.tables.write();
        Ok(tables.users.get_mut(&id).map(|user| {
            user.is_chirpy_red = true;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete_all_users(&self) -> Result<u64, StoreError> {
        let mut tables = self.tables.write();
        let removed = tables.users.len() as u64;
        tables.users.clear();
        tables.chirps.clear();
        self.refresh_tokens.clear();
        Ok(removed)
    }

    async fn create_chirp(&self, user_id: Uuid, body: &str) -> Result<ChirpRecord, StoreError> {
        let mut tables = self.tables.write();
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::UnknownUser);
        }

        let now = Utc::now();
        let chirp = ChirpRecord {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body: body.to_string(),
            user_id,
        };
        tables.chirps.push(chirp.clone());
        Ok(chirp)
    }

    async fn get_chirp(&self, id: Uuid) -> Result<Option<ChirpRecord>, StoreError> {
        Ok(self
            .tables
            .read()
            .chirps
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_chirps(&self, author_id: Option<Uuid>) -> Result<Vec<ChirpRecord>, StoreError> {
        let mut chirps: Vec<ChirpRecord> = self
            .tables
            .read()
            .chirps
            .iter()
            .filter(|c| author_id.map_or(true, |author| c.user_id == author))
            .cloned()
            .collect();
        // stable, so equal timestamps keep insertion order
        chirps.sort_by_key(|c| c.created_at);
        Ok(chirps)
    }

    async fn delete_chirp(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write();
        let before = tables.chirps.len();
        tables.chirps.retain(|c| c.id != id);
        Ok(tables.chirps.len() != before)
    }

    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord, StoreError> {
        // held so a concurrent reset cannot orphan the token
        let tables = self.tables.read();
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::UnknownUser);
        }

        let now = Utc::now();
        let record = RefreshTokenRecord {
            token: token.to_string(),
            created_at: now,
            updated_at: now,
            user_id,
            expires_at,
            revoked_at: None,
        };
        self.refresh_tokens.insert(record.token.clone(), record.clone());
        Ok(record)
    }

    async fn get_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, StoreError> {
        Ok(self.refresh_tokens.get(token).map(|entry| entry.value().clone()))
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<bool, StoreError> {
        match self.refresh_tokens.get_mut(token) {
            Some(mut entry) => {
                let now = Utc::now();
                entry.revoked_at = Some(now);
                entry.updated_at = now;
                Ok(true)
            },
            None => Ok(false),
        }
    }
}
