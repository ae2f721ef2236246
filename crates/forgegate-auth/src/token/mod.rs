//! Access token issuance and verification.

pub mod jwt;

pub use jwt::{AccessTokenClaims, JwtCodec};
