#[cfg(feature = "redis-cache")]
mod redis_client_tests;
