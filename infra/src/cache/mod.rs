//! Token store implementations
//!
//! The in-memory store is always available; the Redis store and its
//! client are compiled with the `redis-cache` feature.

pub mod memory_token_store;
#[cfg(feature = "redis-cache")]
pub mod redis_client;
#[cfg(feature = "redis-cache")]
pub mod redis_token_store;

#[cfg(test)]
mod tests;

pub use memory_token_store::InMemoryTokenRepository;
#[cfg(feature = "redis-cache")]
pub use redis_client::RedisClient;
#[cfg(feature = "redis-cache")]
pub use redis_token_store::RedisTokenRepository;

// Re-export commonly used types
pub use ev_shared::config::CacheConfig;
