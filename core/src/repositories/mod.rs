pub mod token;

pub use token::{is_entry_expired, TokenRepository};

#[cfg(test)]
pub use token::MockTokenRepository;
