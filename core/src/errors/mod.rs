//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError};

use ev_shared::errors::error_codes;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Stable code for clients
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Auth(e) => e.error_code(),
            DomainError::Token(e) => e.error_code(),
        }
    }

    /// Shorthand for store and infrastructure failures
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests;
