//! Refresh token storage trait.
//!
//! # Security Considerations
//!
//! - Tokens are stored as SHA-256 fingerprints only
//! - Revocation must be atomic and immediate
//! - Expired tokens are deleted eagerly on use and may be swept
//!   periodically via [`RefreshTokenStore::cleanup_expired`]
//!
//! # Atomicity
//!
//! Login, refresh, and logout may run concurrently, including for the same
//! identity (two refresh calls racing on the same stale token, a login
//! racing a refresh). Implementations MUST therefore make every method
//! atomic with respect to every other method: a database transaction with
//! appropriate isolation, or an equivalent single-writer serialization
//! point. The two methods that carry the security invariants are
//! [`RefreshTokenStore::consume`] (one-time use) and
//! [`RefreshTokenStore::replace_active`] (revoke-all-then-insert).

use async_trait::async_trait;
use uuid::Uuid;

use crate::AuthResult;
use crate::types::RefreshTokenRecord;

/// Storage trait for refresh tokens.
///
/// # Implementations
///
/// Implementations are provided in separate crates:
/// - `forgegate-auth-memory` - in-memory backend
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Finds a refresh token by its fingerprint.
    ///
    /// Returns the record regardless of expiration/revocation status;
    /// callers should check `is_valid()` before trusting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_hash(&self, token_hash: &str) -> AuthResult<Option<RefreshTokenRecord>>;

    /// Atomically revokes all active tokens owned by `record.user_id` and
    /// inserts `record` as the sole active one.
    ///
    /// The revoke-and-insert pair is all-or-nothing: there is no window in
    /// which two tokens for the same identity are simultaneously valid.
    ///
    /// # Returns
    ///
    /// The number of previously active tokens that were revoked.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if a record with the same fingerprint already
    /// exists, or if the operation fails.
    async fn replace_active(&self, record: &RefreshTokenRecord) -> AuthResult<u64>;

    /// Atomically consumes a token for one-time use.
    ///
    /// Looks up the record by fingerprint and, in a single atomic step:
    ///
    /// - no record matches: fails with `InvalidToken`
    /// - the record is revoked: fails with `TokenRevoked`
    /// - the record is expired: deletes it and fails with `TokenExpired`
    /// - otherwise: marks it revoked and returns it
    ///
    /// When several callers present the same token concurrently, exactly
    /// one receives the record; every other caller observes `TokenRevoked`.
    ///
    /// # Errors
    ///
    /// The token-kind errors above, or `Storage` if the operation fails.
    async fn consume(&self, token_hash: &str) -> AuthResult<RefreshTokenRecord>;

    /// Revokes a refresh token.
    ///
    /// Idempotent: revoking an already-revoked token, or a fingerprint
    /// with no matching record, is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn revoke(&self, token_hash: &str) -> AuthResult<()>;

    /// Deletes a record by ID.
    ///
    /// # Returns
    ///
    /// `true` if a record was deleted, `false` if none matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn delete(&self, id: Uuid) -> AuthResult<bool>;

    /// Deletes all expired records.
    ///
    /// Retention sweep; call periodically to bound storage growth.
    ///
    /// # Returns
    ///
    /// The number of records deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the cleanup operation fails.
    async fn cleanup_expired(&self) -> AuthResult<u64>;

    /// Lists all active (non-revoked, non-expired) tokens for an identity.
    ///
    /// With rotation in force this returns at most one record; the method
    /// exists so that callers (and tests) can observe the invariant.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn list_active_by_user(&self, user_id: Uuid) -> AuthResult<Vec<RefreshTokenRecord>>;
}
