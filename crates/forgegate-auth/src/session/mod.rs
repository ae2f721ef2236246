//! Session lifecycle orchestration.

pub mod service;

pub use service::{SessionService, SessionTokens};
