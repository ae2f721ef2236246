//! Identity provisioning.
//!
//! Identities are created out-of-band, not through the session API. The
//! embedding binary calls [`ensure_identity`] once at startup with its
//! configured admin credentials so a fresh deployment has an account to
//! log in with.

use crate::AuthResult;
use crate::error::AuthError;
use crate::password;
use crate::storage::IdentityStore;
use crate::types::Identity;

/// Ensures an identity with the given username exists.
///
/// If the username is already taken, the existing identity is returned
/// unchanged; in particular the stored password hash is NOT updated, so a
/// changed configuration password does not silently rewrite credentials.
/// Otherwise the password is hashed and a new enabled identity with `role`
/// is created.
///
/// # Errors
///
/// Returns `Internal` if password hashing fails, or `Storage` if the store
/// operation fails.
pub async fn ensure_identity(
    store: &dyn IdentityStore,
    username: &str,
    password_input: &str,
    role: &str,
) -> AuthResult<Identity> {
    if let Some(existing) = store.find_by_username(username).await? {
        tracing::info!(username = %username, "identity already provisioned");
        return Ok(existing);
    }

    let password_hash = password::hash_password(password_input)
        .map_err(|e| AuthError::internal(format!("Password hashing failed: {e}")))?;

    let identity = Identity::builder(username, password_hash).role(role).build();
    store.create(&identity).await?;

    tracing::info!(username = %username, role = %role, "identity provisioned");

    Ok(identity)
}
