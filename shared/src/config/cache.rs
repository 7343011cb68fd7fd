//! Token store configuration

use serde::{Deserialize, Serialize};

/// Which token store backs the refresh registry and revocation set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local maps; lost on restart
    #[default]
    Memory,
    /// Shared Redis instance with per-entry TTLs
    Redis,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            _ => Err(format!("Invalid token store backend: {}", s)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Token store backend
    pub backend: StoreBackend,

    /// Redis connection URL
    pub url: String,

    /// Prefix prepended to every key written by the token store
    pub key_prefix: String,

    /// Connection attempts before giving up at startup
    pub max_retries: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            url: String::from("redis://localhost:6379"),
            key_prefix: String::from("eventhub:auth:"),
            max_retries: 3,
        }
    }
}

impl CacheConfig {
    /// Create a Redis-backed configuration with URL
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: StoreBackend::Redis,
            url: url.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("redis".parse::<StoreBackend>().unwrap(), StoreBackend::Redis);
        assert_eq!("Memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("mongo".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_default_is_memory() {
        let config = CacheConfig::default();
        assert_eq!(config.backend, StoreBackend::Memory);
        assert!(config.key_prefix.ends_with(':'));
    }
}
