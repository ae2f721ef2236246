//! JWT access token codec.
//!
//! Access tokens are short-lived, self-contained, HMAC-SHA256-signed JWTs.
//! Verification is stateless: signature plus expiry, no store lookup. That
//! is also why the lifetime must stay short, since a stolen access token
//! cannot be revoked before it expires.
//!
//! The signing secret is process-wide configuration, loaded once at
//! startup and never mutated. The codec is `Send + Sync` and is shared
//! behind an `Arc`.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::AuthResult;
use crate::error::AuthError;
use crate::types::Identity;

/// Minimum signing secret length in bytes.
///
/// HMAC-SHA256 keys shorter than the hash output weaken the MAC.
const MIN_SECRET_LEN: usize = 32;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessTokenClaims {
    /// Issuer (server URL).
    pub iss: String,

    /// Subject (identity ID).
    pub sub: String,

    /// Username of the subject.
    pub username: String,

    /// Role granted to the subject.
    pub role: String,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// JWT ID, unique per issued token.
    pub jti: String,
}

impl AccessTokenClaims {
    /// Creates claims for `identity`, expiring `ttl` from now.
    #[must_use]
    pub fn new(issuer: impl Into<String>, identity: &Identity, ttl: Duration) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            iss: issuer.into(),
            sub: identity.id.to_string(),
            username: identity.username.clone(),
            role: identity.role.clone(),
            exp: (now + ttl).unix_timestamp(),
            iat: now.unix_timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::TokenExpired,
            _ => Self::invalid_token(err.to_string()),
        }
    }
}

/// Codec for encoding and verifying access tokens.
#[derive(Debug)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtCodec {
    /// Creates a codec from a shared signing secret.
    ///
    /// # Arguments
    ///
    /// * `secret` - The HMAC-SHA256 signing secret (at least 32 bytes)
    /// * `issuer` - The issuer claim value (typically the server URL)
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the secret is shorter than 32 bytes.
    pub fn from_secret(secret: &[u8], issuer: impl Into<String>) -> AuthResult<Self> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(AuthError::configuration(format!(
                "Signing secret must be at least {MIN_SECRET_LEN} bytes, got {}",
                secret.len()
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
        })
    }

    /// Returns the issuer URL.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Encodes claims into a signed JWT string.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if encoding fails.
    pub fn encode(&self, claims: &AccessTokenClaims) -> AuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::internal(format!("Failed to encode access token: {e}")))
    }

    /// Decodes and verifies a JWT string.
    ///
    /// Checks signature, issuer, and expiry (no leeway, so expiry is
    /// exact). No store access.
    ///
    /// # Errors
    ///
    /// Returns `TokenExpired` if past the expiry claim, `InvalidToken` on a
    /// bad signature, wrong issuer, or malformed structure.
    pub fn decode(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = true;
        validation.validate_aud = false; // No audience claim is issued
        validation.leeway = 0;

        let data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}
