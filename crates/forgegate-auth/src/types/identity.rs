//! Identity domain type.
//!
//! An identity is an account that can authenticate against the session
//! service. Identities are created by an out-of-band provisioning step and
//! are immutable afterwards, except that they can be disabled.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// An identity known to the credential store.
///
/// The password is never held in plaintext; only the Argon2 PHC hash is
/// stored. When exposing `Identity` outside the trust boundary, filter
/// `password_hash` out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Unique identifier for this identity.
    pub id: Uuid,

    /// Username for authentication. Unique within the store.
    pub username: String,

    /// Argon2 PHC hash of the password.
    pub password_hash: String,

    /// Role granted to this identity (e.g. "admin").
    pub role: String,

    /// Whether the identity may authenticate.
    ///
    /// Disabled identities fail login and refresh with the same error as a
    /// wrong password.
    pub enabled: bool,

    /// When the identity was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// When the identity was last updated.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Identity {
    /// Creates a new enabled identity with the "admin" role.
    #[must_use]
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash: password_hash.into(),
            role: "admin".to_string(),
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a new identity builder.
    #[must_use]
    pub fn builder(
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> IdentityBuilder {
        IdentityBuilder::new(username, password_hash)
    }

    /// Returns `true` if the identity may authenticate.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Builder for `Identity` instances.
pub struct IdentityBuilder {
    identity: Identity,
}

impl IdentityBuilder {
    fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(username, password_hash),
        }
    }

    /// Sets the identity ID.
    #[must_use]
    pub fn id(mut self, id: Uuid) -> Self {
        self.identity.id = id;
        self
    }

    /// Sets the role.
    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.identity.role = role.into();
        self
    }

    /// Sets whether the identity is enabled.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.identity.enabled = enabled;
        self
    }

    /// Builds the identity.
    #[must_use]
    pub fn build(self) -> Identity {
        self.identity
    }
}
