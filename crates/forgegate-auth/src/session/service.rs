//! Session service: login, refresh, and logout.
//!
//! The service composes the credential store, the refresh token store, and
//! the JWT codec into the three public session operations. It owns no
//! mutable state of its own; all mutation happens in the stores, and the
//! signing key inside the codec is read-only after startup.
//!
//! # Security
//!
//! - Password verification is constant-time (Argon2); an unknown username
//!   burns a verification against a throwaway hash so the failure path has
//!   statistically similar timing
//! - Refresh tokens rotate on every use: the presented token is consumed
//!   (one-time use) before a replacement is issued, so a replayed token
//!   fails with `TokenRevoked`
//! - At most one refresh token per identity is valid at any instant; a
//!   new login silently ends any previous session
//! - Raw token values and fingerprints are never logged
//!
//! # Concurrency
//!
//! Operations may race, including for the same identity. The security
//! invariants are carried by the store: `consume` admits exactly one of N
//! concurrent presenters of the same token, and `replace_active` performs
//! revoke-all-then-insert atomically. Between the two calls inside
//! `refresh` an identity briefly has zero valid refresh tokens, never
//! two.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::AuthResult;
use crate::config::SessionConfig;
use crate::error::AuthError;
use crate::password;
use crate::storage::{IdentityStore, RefreshTokenStore};
use crate::token::{AccessTokenClaims, JwtCodec};
use crate::types::{Identity, RefreshTokenRecord};

/// Token pair returned by a successful login or refresh.
///
/// The refresh token is the raw value; it is handed out exactly once and
/// only its fingerprint is stored, so a caller that loses it must log in
/// again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokens {
    /// Signed access token (JWT).
    pub access_token: String,

    /// Raw refresh token value.
    pub refresh_token: String,

    /// Token type label for the transport layer.
    pub token_type: String,
}

impl SessionTokens {
    /// Creates a new bearer token pair.
    #[must_use]
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
        }
    }
}

/// Service implementing the session lifecycle.
pub struct SessionService {
    /// Credential store for identity lookup.
    identities: Arc<dyn IdentityStore>,

    /// Refresh token store.
    refresh_tokens: Arc<dyn RefreshTokenStore>,

    /// Codec for access token issuance and verification.
    codec: Arc<JwtCodec>,

    /// Service configuration.
    config: SessionConfig,

    /// Throwaway Argon2 hash verified against when a username is unknown,
    /// so that path costs as much as a real verification.
    fallback_hash: String,
}

impl SessionService {
    /// Creates a new session service.
    ///
    /// Callers should run [`SessionConfig::validate`] on the configuration
    /// before constructing the service.
    ///
    /// # Arguments
    ///
    /// * `identities` - Credential store
    /// * `refresh_tokens` - Refresh token store
    /// * `codec` - Access token codec
    /// * `config` - Service configuration
    #[must_use]
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        codec: Arc<JwtCodec>,
        config: SessionConfig,
    ) -> Self {
        let fallback_hash =
            password::hash_password(&RefreshTokenRecord::generate_token()).unwrap_or_default();

        Self {
            identities,
            refresh_tokens,
            codec,
            config,
            fallback_hash,
        }
    }

    /// Authenticates a username/password pair and opens a session.
    ///
    /// On success issues a fresh access token and a fresh refresh token.
    /// Any previously active refresh token for this identity is revoked,
    /// so the newest login is the only live session.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the username is unknown, the
    /// identity is disabled, or the password does not match. The error is
    /// identical in all three cases.
    pub async fn login(&self, username: &str, password_input: &str) -> AuthResult<SessionTokens> {
        let Some(identity) = self.identities.find_by_username(username).await? else {
            // Burn a verification so unknown-username failures take about
            // as long as wrong-password failures.
            let _ = password::verify_password(password_input, &self.fallback_hash);
            return Err(AuthError::AuthenticationFailed);
        };

        let matches = password::verify_password(password_input, &identity.password_hash)
            .map_err(|e| AuthError::internal(format!("Password verification failed: {e}")))?;

        if !matches || !identity.is_enabled() {
            return Err(AuthError::AuthenticationFailed);
        }

        let access_token = self.issue_access_token(&identity)?;
        let refresh_token = self.issue_refresh_token(&identity).await?;

        tracing::info!(username = %identity.username, "login succeeded");

        Ok(SessionTokens::new(access_token, refresh_token))
    }

    /// Exchanges a refresh token for a new token pair.
    ///
    /// The presented token is consumed: it is atomically marked revoked
    /// before the replacement is issued, so presenting it again (or
    /// concurrently) fails with `TokenRevoked`. The returned raw refresh
    /// value is always distinct from every previously issued one.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` if no record matches the fingerprint, or the
    ///   owning identity no longer exists
    /// - `TokenRevoked` if the token was already rotated or logged out
    /// - `TokenExpired` if past expiry; the record is deleted as a side
    ///   effect
    /// - `AuthenticationFailed` if the owning identity has been disabled
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<SessionTokens> {
        let token_hash = RefreshTokenRecord::hash_token(refresh_token);
        let consumed = self.refresh_tokens.consume(&token_hash).await?;

        let identity = self
            .identities
            .find_by_id(consumed.user_id)
            .await?
            .ok_or_else(|| AuthError::invalid_token("Token owner no longer exists"))?;

        if !identity.is_enabled() {
            return Err(AuthError::AuthenticationFailed);
        }

        let access_token = self.issue_access_token(&identity)?;
        let new_refresh_token = self.issue_refresh_token(&identity).await?;

        tracing::debug!(username = %identity.username, "refresh token rotated");

        Ok(SessionTokens::new(access_token, new_refresh_token))
    }

    /// Ends the session that owns the given refresh token.
    ///
    /// Idempotent: logging out with an unknown or already-revoked token is
    /// not an error (the session is gone either way).
    ///
    /// # Errors
    ///
    /// Returns `Storage` only if the backing store fails.
    pub async fn logout(&self, refresh_token: &str) -> AuthResult<()> {
        let token_hash = RefreshTokenRecord::hash_token(refresh_token);
        self.refresh_tokens.revoke(&token_hash).await
    }

    /// Verifies an access token and returns its claims.
    ///
    /// Stateless: signature and expiry only, no store access. Intended for
    /// the embedding transport layer's auth middleware.
    ///
    /// # Errors
    ///
    /// Returns `TokenExpired` or `InvalidToken` as reported by the codec.
    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        self.codec.decode(token)
    }

    /// Issues a new access token for `identity`.
    fn issue_access_token(&self, identity: &Identity) -> AuthResult<String> {
        let claims = AccessTokenClaims::new(
            self.codec.issuer(),
            identity,
            self.config.access_token_lifetime,
        );
        self.codec.encode(&claims)
    }

    /// Issues a new refresh token for `identity`, revoking all prior ones.
    ///
    /// Returns the raw value. Only the fingerprint is stored; the raw
    /// value is never retrievable again.
    async fn issue_refresh_token(&self, identity: &Identity) -> AuthResult<String> {
        let raw = RefreshTokenRecord::generate_token();
        let now = OffsetDateTime::now_utc();

        let record = RefreshTokenRecord {
            id: Uuid::new_v4(),
            token_hash: RefreshTokenRecord::hash_token(&raw),
            user_id: identity.id,
            created_at: now,
            expires_at: now + self.config.refresh_token_lifetime,
            revoked_at: None,
        };

        let revoked = self.refresh_tokens.replace_active(&record).await?;
        if revoked > 0 {
            tracing::debug!(
                user_id = %identity.id,
                revoked,
                "revoked previously active refresh tokens"
            );
        }

        Ok(raw)
    }
}
