//! Refresh token domain type.
//!
//! # Security
//!
//! - Refresh tokens are stored as SHA-256 fingerprints, never plaintext
//! - The raw value is handed to the caller exactly once, at issuance
//! - At most one record per identity is non-revoked at any instant
//!
//! When validating a presented token:
//!
//! 1. Fingerprint the incoming raw value
//! 2. Look up by fingerprint
//! 3. Check revocation and expiry

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Refresh token record as persisted by the refresh token store.
///
/// Refresh tokens let a caller obtain new access tokens without
/// re-presenting the password. They are long-lived, rotated on every use,
/// and revocable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRecord {
    /// Unique identifier for this record.
    pub id: Uuid,

    /// SHA-256 fingerprint of the raw token value, hex-encoded.
    /// The raw value itself is never persisted.
    pub token_hash: String,

    /// Identity that owns this token.
    pub user_id: Uuid,

    /// When this token was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// When this token expires.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,

    /// When this token was revoked (None = not revoked).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub revoked_at: Option<OffsetDateTime>,
}

impl RefreshTokenRecord {
    /// Returns `true` if this token has expired.
    ///
    /// A token is usable only while the current time is strictly before
    /// `expires_at`.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        OffsetDateTime::now_utc() >= self.expires_at
    }

    /// Returns `true` if this token has been revoked.
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Returns `true` if this token is valid (not expired and not revoked).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_revoked()
    }

    /// Fingerprint a raw token value using SHA-256.
    ///
    /// Deterministic, so the same raw value always yields the same
    /// fingerprint; used both when storing new tokens and when looking up
    /// presented ones. Not invertible.
    #[must_use]
    pub fn hash_token(token: &str) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Generate a cryptographically secure random raw token.
    ///
    /// Returns a 256-bit random value encoded as base64url (43 characters).
    #[must_use]
    pub fn generate_token() -> String {
        use base64::Engine;
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let mut bytes = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    #[test]
    fn test_hash_token() {
        let token = "test-token-value";
        let hash = RefreshTokenRecord::hash_token(token);

        // SHA-256 produces 64 hex characters
        assert_eq!(hash.len(), 64);

        // Same input produces same hash
        assert_eq!(hash, RefreshTokenRecord::hash_token(token));

        // Different input produces different hash
        assert_ne!(hash, RefreshTokenRecord::hash_token("different-token"));
    }

    #[test]
    fn test_generate_token() {
        let token = RefreshTokenRecord::generate_token();

        // 32 bytes base64url encoded = 43 characters
        assert_eq!(token.len(), 43);

        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_generate_token_uniqueness() {
        let tokens: Vec<String> = (0..100)
            .map(|_| RefreshTokenRecord::generate_token())
            .collect();

        let mut unique = tokens.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(tokens.len(), unique.len());
    }

    #[test]
    fn test_is_expired() {
        let now = OffsetDateTime::now_utc();

        let token = create_test_record(now + Duration::hours(1), None);
        assert!(!token.is_expired());

        let token = create_test_record(now - Duration::minutes(1), None);
        assert!(token.is_expired());
    }

    #[test]
    fn test_is_revoked() {
        let now = OffsetDateTime::now_utc();

        let token = create_test_record(now + Duration::hours(1), None);
        assert!(!token.is_revoked());

        let token = create_test_record(now + Duration::hours(1), Some(now));
        assert!(token.is_revoked());
    }

    #[test]
    fn test_is_valid() {
        let now = OffsetDateTime::now_utc();

        let token = create_test_record(now + Duration::hours(1), None);
        assert!(token.is_valid());

        let token = create_test_record(now - Duration::minutes(1), None);
        assert!(!token.is_valid());

        let token = create_test_record(now + Duration::hours(1), Some(now));
        assert!(!token.is_valid());
    }

    #[test]
    fn test_serialization() {
        let now = OffsetDateTime::now_utc();
        let token = create_test_record(now + Duration::hours(1), None);

        let json = serde_json::to_string(&token).unwrap();
        assert!(!json.contains("revokedAt"));

        let deserialized: RefreshTokenRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(token.id, deserialized.id);
        assert_eq!(token.token_hash, deserialized.token_hash);
        assert_eq!(token.user_id, deserialized.user_id);
    }

    fn create_test_record(
        expires_at: OffsetDateTime,
        revoked_at: Option<OffsetDateTime>,
    ) -> RefreshTokenRecord {
        RefreshTokenRecord {
            id: Uuid::new_v4(),
            token_hash: RefreshTokenRecord::hash_token("test-token"),
            user_id: Uuid::new_v4(),
            created_at: OffsetDateTime::now_utc(),
            expires_at,
            revoked_at,
        }
    }
}
