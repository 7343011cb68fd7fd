//! Domain entities representing authentication objects.

pub mod identity;
pub mod role;
pub mod token;

// Re-export commonly used types
pub use identity::AuthIdentity;
pub use role::Role;
pub use token::{
    Claims, TokenKind, TokenPair, ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS,
    TOKEN_TYPE_BEARER,
};
