//! Credential state derived at verification time.

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

/// State of a presented credential
///
/// Never stored: evaluated from the revocation set, the signature and
/// the embedded expiry on every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialState {
    Valid(Claims),
    Expired,
    Revoked,
    Malformed,
}

impl CredentialState {
    /// Claims of a valid credential, or the matching token error
    pub fn into_claims(self) -> Result<Claims, TokenError> {
        match self {
            CredentialState::Valid(claims) => Ok(claims),
            CredentialState::Expired => Err(TokenError::TokenExpired),
            CredentialState::Revoked => Err(TokenError::TokenRevoked),
            CredentialState::Malformed => Err(TokenError::TokenMalformed),
        }
    }
}
