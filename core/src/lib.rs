//! # EventHub Core
//!
//! Core authentication logic for the EventHub backend.
//! This crate contains the token entities, the token store contract,
//! the token lifecycle service and role-based authorization.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{AuthIdentity, Claims, Role, TokenKind, TokenPair};
pub use domain::value_objects::CredentialState;
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::TokenRepository;
pub use services::{
    authorize, authorize_owner_or_admin, extract_bearer_token, require_authenticated,
    CleanupResult, RevokeRequest, RevokeScope, TokenCleanupConfig, TokenCleanupService,
    TokenService, TokenServiceConfig,
};
