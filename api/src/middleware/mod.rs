pub mod auth;
pub mod cors;

pub use auth::{Authenticated, JwtAuth, OptionalIdentity};
pub use cors::create_cors;
