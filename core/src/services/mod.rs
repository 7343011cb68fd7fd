//! Business services containing the token lifecycle and authorization rules.

pub mod authorization;
pub mod token;

// Re-export commonly used types
pub use authorization::{authorize, authorize_owner_or_admin, require_authenticated};
pub use token::{
    extract_bearer_token, CleanupResult, RevokeRequest, RevokeScope, TokenCleanupConfig,
    TokenCleanupService, TokenService, TokenServiceConfig,
};
