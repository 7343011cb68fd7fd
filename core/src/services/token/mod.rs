//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - JWT access and refresh token issuance
//! - Verification against the revocation set, signature and expiry
//! - Refresh token rotation
//! - Token revocation and the periodic sweep of expired entries

mod cleanup;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use config::TokenServiceConfig;
pub use service::{extract_bearer_token, RevokeRequest, RevokeScope, TokenService};
