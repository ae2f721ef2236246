//! In-memory refresh token store.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use forgegate_auth::error::AuthError;
use forgegate_auth::storage::RefreshTokenStore;
use forgegate_auth::types::RefreshTokenRecord;
use forgegate_auth::AuthResult;

/// In-memory refresh token store, keyed by token fingerprint.
///
/// Every trait method completes under a single `RwLock` guard, so each
/// operation is atomic with respect to every other. That single-writer
/// serialization point is what makes `consume` a one-time-use gate and
/// `replace_active` an all-or-nothing revoke-and-insert, as the trait
/// contract requires.
#[derive(Debug, Default)]
pub struct MemoryRefreshTokenStore {
    tokens: RwLock<HashMap<String, RefreshTokenRecord>>,
}

impl MemoryRefreshTokenStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of records, including revoked and expired.
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Returns `true` if the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn find_by_hash(&self, token_hash: &str) -> AuthResult<Option<RefreshTokenRecord>> {
        Ok(self.tokens.read().await.get(token_hash).cloned())
    }

    async fn replace_active(&self, record: &RefreshTokenRecord) -> AuthResult<u64> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&record.token_hash) {
            return Err(AuthError::storage("Token fingerprint already exists"));
        }

        let now = OffsetDateTime::now_utc();
        let mut revoked = 0u64;
        for token in tokens.values_mut() {
            if token.user_id == record.user_id && token.revoked_at.is_none() {
                token.revoked_at = Some(now);
                revoked += 1;
            }
        }

        tokens.insert(record.token_hash.clone(), record.clone());
        Ok(revoked)
    }

    async fn consume(&self, token_hash: &str) -> AuthResult<RefreshTokenRecord> {
        let mut tokens = self.tokens.write().await;

        let Some(record) = tokens.get_mut(token_hash) else {
            return Err(AuthError::invalid_token("Unknown refresh token"));
        };

        if record.is_revoked() {
            return Err(AuthError::TokenRevoked);
        }

        if record.is_expired() {
            tokens.remove(token_hash);
            return Err(AuthError::TokenExpired);
        }

        record.revoked_at = Some(OffsetDateTime::now_utc());
        Ok(record.clone())
    }

    async fn revoke(&self, token_hash: &str) -> AuthResult<()> {
        let mut tokens = self.tokens.write().await;
        if let Some(record) = tokens.get_mut(token_hash) {
            if record.revoked_at.is_none() {
                record.revoked_at = Some(OffsetDateTime::now_utc());
            }
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AuthResult<bool> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| t.id != id);
        Ok(tokens.len() < before)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired());
        Ok((before - tokens.len()) as u64)
    }

    async fn list_active_by_user(&self, user_id: Uuid) -> AuthResult<Vec<RefreshTokenRecord>> {
        Ok(self
            .tokens
            .read()
            .await
            .values()
            .filter(|t| t.user_id == user_id && t.is_valid())
            .cloned()
            .collect())
    }
}
