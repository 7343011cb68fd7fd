// Library exports for the binary and integration tests

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{build_token_store, create_app, AppState, SharedTokenService};
