//! Error types for token management and authorization
//!
//! Each variant carries a stable machine-readable code; the HTTP layer
//! decides status codes and renders the payload.

use ev_shared::errors::error_codes;
use thiserror::Error;

use crate::domain::entities::role::Role;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Access token required")]
    MissingToken,

    #[error("Refresh token required")]
    MissingRefreshToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token format")]
    TokenMalformed,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Stable code for clients
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::MissingToken => error_codes::MISSING_TOKEN,
            TokenError::MissingRefreshToken => error_codes::MISSING_REFRESH_TOKEN,
            TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
            TokenError::TokenMalformed => error_codes::INVALID_TOKEN,
            TokenError::TokenRevoked => error_codes::TOKEN_REVOKED,
            TokenError::InvalidRefreshToken => error_codes::INVALID_REFRESH_TOKEN,
            TokenError::TokenGenerationFailed => error_codes::TOKEN_GENERATION_FAILED,
        }
    }
}

/// Authorization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    NotAuthenticated,

    #[error("Insufficient permissions")]
    InsufficientPermissions { required: Vec<Role>, current: Role },

    #[error("Access denied. You can only access your own resources.")]
    NotResourceOwner,
}

impl AuthError {
    /// Stable code for clients
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::NotAuthenticated => error_codes::NOT_AUTHENTICATED,
            AuthError::InsufficientPermissions { .. } | AuthError::NotResourceOwner => {
                error_codes::INSUFFICIENT_PERMISSIONS
            }
        }
    }
}
