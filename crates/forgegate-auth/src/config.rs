//! Session lifecycle configuration.
//!
//! Lifetimes for the two credential kinds the session service issues.
//! Access tokens are short-lived because they are stateless and cannot be
//! revoked before expiry; refresh tokens are long-lived, store-backed, and
//! revocable.

use time::Duration;

use crate::AuthResult;
use crate::error::AuthError;

/// Configuration for the session service.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Issuer URL included in access tokens as `iss`.
    pub issuer: String,

    /// Access token lifetime.
    /// Default: 15 minutes.
    pub access_token_lifetime: Duration,

    /// Refresh token lifetime.
    /// Default: 7 days.
    pub refresh_token_lifetime: Duration,
}

impl SessionConfig {
    /// Creates a new configuration with default lifetimes.
    ///
    /// # Arguments
    ///
    /// * `issuer` - The issuing server's URL
    #[must_use]
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            access_token_lifetime: Duration::minutes(15),
            refresh_token_lifetime: Duration::days(7),
        }
    }

    /// Sets the access token lifetime.
    #[must_use]
    pub fn with_access_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.access_token_lifetime = lifetime;
        self
    }

    /// Sets the refresh token lifetime.
    #[must_use]
    pub fn with_refresh_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.refresh_token_lifetime = lifetime;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if either lifetime is non-positive, or if the
    /// access token lifetime is not strictly shorter than the refresh token
    /// lifetime. Access tokens cannot be revoked before expiry, so letting
    /// them outlive the revocable credential would defeat revocation.
    pub fn validate(&self) -> AuthResult<()> {
        if self.issuer.is_empty() {
            return Err(AuthError::configuration("Issuer must not be empty"));
        }

        if self.access_token_lifetime <= Duration::ZERO {
            return Err(AuthError::configuration(
                "Access token lifetime must be positive",
            ));
        }

        if self.refresh_token_lifetime <= Duration::ZERO {
            return Err(AuthError::configuration(
                "Refresh token lifetime must be positive",
            ));
        }

        if self.access_token_lifetime >= self.refresh_token_lifetime {
            return Err(AuthError::configuration(
                "Access token lifetime must be strictly shorter than refresh token lifetime",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetimes() {
        let config = SessionConfig::new("https://admin.example.com");
        assert_eq!(config.issuer, "https://admin.example.com");
        assert_eq!(config.access_token_lifetime, Duration::minutes(15));
        assert_eq!(config.refresh_token_lifetime, Duration::days(7));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = SessionConfig::new("https://admin.example.com")
            .with_access_token_lifetime(Duration::minutes(5))
            .with_refresh_token_lifetime(Duration::days(30));

        assert_eq!(config.access_token_lifetime, Duration::minutes(5));
        assert_eq!(config.refresh_token_lifetime, Duration::days(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_issuer() {
        let config = SessionConfig::new("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_lifetimes() {
        let config = SessionConfig::new("https://admin.example.com")
            .with_access_token_lifetime(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = SessionConfig::new("https://admin.example.com")
            .with_refresh_token_lifetime(Duration::minutes(-1));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_access_outliving_refresh() {
        let config = SessionConfig::new("https://admin.example.com")
            .with_access_token_lifetime(Duration::days(8));
        let err = config.validate().unwrap_err();
        assert!(err.is_server_error());

        // Equal lifetimes are also rejected: strictly shorter is required.
        let config = SessionConfig::new("https://admin.example.com")
            .with_access_token_lifetime(Duration::days(7));
        assert!(config.validate().is_err());
    }
}
