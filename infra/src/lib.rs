//! # Infrastructure Layer
//!
//! Concrete token stores for the EventHub authentication core.
//!
//! ## Stores
//!
//! - **In-memory**: process-local maps behind a single lock
//! - **Redis**: shared store with per-entry TTLs
//!
//! ## Features
//!
//! - `redis-cache`: Enable the Redis token store (default)

use ev_core::errors::DomainError;

/// Cache module - token store implementations
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err.to_string())
    }
}
