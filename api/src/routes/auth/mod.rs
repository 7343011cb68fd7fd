//! Token lifecycle route handlers
//!
//! - `POST /refresh` rotates a refresh token into a new pair
//! - `POST /revoke` revokes presented tokens, or all of the caller's tokens
//! - `GET /me` returns the authenticated identity
//! - `GET /revoked-count` reports the revocation set size (admin only)

pub mod refresh;
pub mod revoke;
pub mod session;

pub use refresh::refresh_token;
pub use revoke::revoke_tokens;
pub use session::{current_session, revoked_count};
