//! Value objects computed from credentials at verification time.

pub mod credential_state;

pub use credential_state::CredentialState;
