//! Password hashing and verification.
//!
//! This module provides Argon2-based hashing for identity passwords.
//!
//! # Security
//!
//! - Hashing uses Argon2id (hybrid mode) with default parameters
//! - Salts are generated using OsRng (cryptographically secure RNG)
//! - Verification time depends only on the hash parameters, not on how
//!   much of the password matches
//!
//! # Example
//!
//! ```
//! use forgegate_auth::password::{hash_password, verify_password};
//!
//! let hash = hash_password("correct horse battery staple").unwrap();
//! assert!(hash.starts_with("$argon2id$"));
//!
//! assert!(verify_password("correct horse battery staple", &hash).unwrap());
//! assert!(!verify_password("wrong password", &hash).unwrap());
//! ```

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash a password for secure storage using Argon2id.
///
/// Uses Argon2id (hybrid mode) with:
/// - Cryptographically secure random salt (OsRng)
/// - Default parameters (memory cost, time cost, parallelism)
/// - PHC string format for storage
///
/// # Arguments
///
/// * `password` - The plaintext password to hash
///
/// # Returns
///
/// PHC-formatted hash string suitable for database storage.
///
/// # Errors
///
/// Returns `argon2::password_hash::Error` if hashing fails (rare).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash.
///
/// # Arguments
///
/// * `password` - The plaintext password to verify
/// * `hash` - The PHC-formatted Argon2 hash from storage
///
/// # Returns
///
/// `Ok(true)` if the password matches the hash, `Ok(false)` if it doesn't
/// match. Returns `Err` only if the hash format is invalid.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    let result = Argon2::default().verify_password(password.as_bytes(), &parsed_hash);
    Ok(result.is_ok())
}
