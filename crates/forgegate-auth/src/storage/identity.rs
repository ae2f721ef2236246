//! Identity storage trait.
//!
//! Defines the interface for identity persistence. Identities are created
//! by provisioning and never mutated afterwards, except for disablement.

use async_trait::async_trait;
use uuid::Uuid;

use crate::AuthResult;
use crate::types::Identity;

/// Storage operations for identities.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Finds an identity by username.
    ///
    /// Returns `None` if no identity with that username exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<Identity>>;

    /// Finds an identity by its unique ID.
    ///
    /// Returns `None` if the identity doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<Identity>>;

    /// Creates a new identity.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if an identity with the same username already
    /// exists, or if the operation fails.
    async fn create(&self, identity: &Identity) -> AuthResult<()>;

    /// Enables or disables an identity.
    ///
    /// This is the only permitted mutation of an identity record.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the identity doesn't exist or the operation
    /// fails.
    async fn set_enabled(&self, id: Uuid, enabled: bool) -> AuthResult<()>;
}
