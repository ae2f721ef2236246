//! In-memory identity store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use forgegate_auth::error::AuthError;
use forgegate_auth::storage::IdentityStore;
use forgegate_auth::types::Identity;
use forgegate_auth::AuthResult;

/// In-memory identity store.
///
/// Enforces username uniqueness on create. Lookups by username scan the
/// map; identity counts are small (admin accounts), so no index is kept.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    identities: RwLock<HashMap<Uuid, Identity>>,
}

impl MemoryIdentityStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of identities in the store.
    pub async fn len(&self) -> usize {
        self.identities.read().await.len()
    }

    /// Returns `true` if the store holds no identities.
    pub async fn is_empty(&self) -> bool {
        self.identities.read().await.is_empty()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<Identity>> {
        Ok(self
            .identities
            .read()
            .await
            .values()
            .find(|i| i.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<Identity>> {
        Ok(self.identities.read().await.get(&id).cloned())
    }

    async fn create(&self, identity: &Identity) -> AuthResult<()> {
        let mut identities = self.identities.write().await;

        if identities.values().any(|i| i.username == identity.username) {
            return Err(AuthError::storage(format!(
                "Username '{}' already exists",
                identity.username
            )));
        }
        if identities.contains_key(&identity.id) {
            return Err(AuthError::storage("Identity ID already exists"));
        }

        identities.insert(identity.id, identity.clone());
        Ok(())
    }

    async fn set_enabled(&self, id: Uuid, enabled: bool) -> AuthResult<()> {
        let mut identities = self.identities.write().await;
        let identity = identities
            .get_mut(&id)
            .ok_or_else(|| AuthError::storage("Identity not found"))?;
        identity.enabled = enabled;
        identity.updated_at = time::OffsetDateTime::now_utc();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryIdentityStore::new();
        let identity = Identity::new("admin", "$argon2id$fake");

        store.create(&identity).await.unwrap();

        let found = store.find_by_username("admin").await.unwrap().unwrap();
        assert_eq!(found.id, identity.id);

        let found = store.find_by_id(identity.id).await.unwrap().unwrap();
        assert_eq!(found.username, "admin");

        assert!(store.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_username() {
        let store = MemoryIdentityStore::new();
        store
            .create(&Identity::new("admin", "$argon2id$fake"))
            .await
            .unwrap();

        let result = store.create(&Identity::new("admin", "$argon2id$other")).await;
        assert!(matches!(result.unwrap_err(), AuthError::Storage { .. }));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_set_enabled() {
        let store = MemoryIdentityStore::new();
        let identity = Identity::new("admin", "$argon2id$fake");
        store.create(&identity).await.unwrap();

        store.set_enabled(identity.id, false).await.unwrap();

        let found = store.find_by_id(identity.id).await.unwrap().unwrap();
        assert!(!found.is_enabled());
        assert!(found.updated_at >= identity.updated_at);
    }

    #[tokio::test]
    async fn test_set_enabled_unknown_identity() {
        let store = MemoryIdentityStore::new();
        let result = store.set_enabled(Uuid::new_v4(), false).await;
        assert!(matches!(result.unwrap_err(), AuthError::Storage { .. }));
    }
}
