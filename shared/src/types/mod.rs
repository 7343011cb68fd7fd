//! Type definitions shared by the HTTP layer
//!
//! - `response` - success wrappers and health checks

pub mod response;

pub use response::{ApiResponse, HealthResponse};
