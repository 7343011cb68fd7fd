//! Tests for domain error codes and messages

use crate::domain::entities::role::Role;
use crate::errors::{AuthError, DomainError, TokenError};

#[test]
fn test_token_error_codes() {
    assert_eq!(TokenError::MissingToken.error_code(), "MISSING_TOKEN");
    assert_eq!(TokenError::TokenMalformed.error_code(), "INVALID_TOKEN");
    assert_eq!(TokenError::TokenRevoked.error_code(), "TOKEN_REVOKED");
    assert_eq!(TokenError::InvalidRefreshToken.error_code(), "INVALID_REFRESH_TOKEN");
}

#[test]
fn test_domain_error_bridges_codes() {
    let err: DomainError = TokenError::TokenExpired.into();
    assert_eq!(err.error_code(), "TOKEN_EXPIRED");
    assert_eq!(err.to_string(), "Token has expired");

    let err: DomainError = AuthError::InsufficientPermissions {
        required: vec![Role::Organizer],
        current: Role::User,
    }
    .into();
    assert_eq!(err.error_code(), "INSUFFICIENT_PERMISSIONS");

    let err = DomainError::internal("store offline");
    assert_eq!(err.error_code(), "INTERNAL_ERROR");
    assert!(err.to_string().contains("store offline"));
}
