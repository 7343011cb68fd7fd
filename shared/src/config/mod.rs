//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing secrets, token lifetimes and the revocation sweep
//! - `cache` - Token store backend selection and Redis connection
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod cache;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{CleanupConfig, JwtConfig, MAX_TOKEN_EXPIRY_SECONDS, MIN_SECRET_LENGTH};
pub use cache::{CacheConfig, StoreBackend};
pub use environment::{Environment, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Revocation sweep configuration
    pub cleanup: CleanupConfig,

    /// Token store configuration
    pub cache: CacheConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Check the loaded values before the server starts
    pub fn validate(&self) -> Result<(), String> {
        self.jwt.validate()?;
        if self.cleanup.enabled && self.cleanup.interval_seconds == 0 {
            return Err("cleanup.interval_seconds must be greater than zero".to_string());
        }
        if self.cache.backend == StoreBackend::Redis && self.cache.url.trim().is_empty() {
            return Err("cache.url is required when the redis token store is selected".to_string());
        }
        Ok(())
    }
}
