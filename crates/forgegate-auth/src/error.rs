//! Authentication and session error types.
//!
//! This module defines all error kinds that can occur during login, token
//! refresh, and logout operations. Callers are expected to match on the
//! error kind rather than parse messages.

/// Errors that can occur during authentication and session operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The username/password pair could not be verified.
    ///
    /// The message deliberately does not distinguish an unknown username
    /// from a wrong password or a disabled account, so callers cannot be
    /// used as a username-enumeration oracle.
    #[error("Invalid username or password")]
    AuthenticationFailed,

    /// The token is malformed, has a bad signature, or matches no record.
    #[error("Invalid token: {message}")]
    InvalidToken {
        /// Description of why the token is invalid.
        message: String,
    },

    /// The token has been explicitly revoked (rotation or logout).
    #[error("Token revoked")]
    TokenRevoked,

    /// The token is past its expiry.
    #[error("Token expired")]
    TokenExpired,

    /// An error occurred while storing or retrieving auth data.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// The auth configuration is invalid.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// An unexpected internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `InvalidToken` error.
    #[must_use]
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a client error (caller must re-authenticate).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed
                | Self::InvalidToken { .. }
                | Self::TokenRevoked
                | Self::TokenExpired
        )
    }

    /// Returns `true` if this is a server error (nothing the caller can fix).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Storage { .. } | Self::Configuration { .. } | Self::Internal { .. }
        )
    }

    /// Returns `true` if this is a token-related error.
    #[must_use]
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidToken { .. } | Self::TokenRevoked | Self::TokenExpired
        )
    }
}
