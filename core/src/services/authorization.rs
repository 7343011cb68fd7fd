//! Role-based authorization checks on an authenticated identity.

use tracing::warn;

use crate::domain::entities::identity::AuthIdentity;
use crate::domain::entities::role::Role;
use crate::errors::{AuthError, DomainError};

/// Fails with `NotAuthenticated` when no identity is attached
pub fn require_authenticated(identity: Option<&AuthIdentity>) -> Result<&AuthIdentity, DomainError> {
    identity.ok_or(DomainError::Auth(AuthError::NotAuthenticated))
}

/// Checks that the identity holds one of `allowed`
///
/// `Admin` passes every check, including an empty `allowed` list.
pub fn authorize(identity: &AuthIdentity, allowed: &[Role]) -> Result<(), DomainError> {
    if identity.role.is_admin() || allowed.contains(&identity.role) {
        return Ok(());
    }

    warn!(
        subject = %identity.subject,
        role = %identity.role,
        "Insufficient permissions"
    );
    Err(AuthError::InsufficientPermissions {
        required: allowed.to_vec(),
        current: identity.role,
    }
    .into())
}

/// Checks that the identity owns `owner_id`, or is an admin
pub fn authorize_owner_or_admin(identity: &AuthIdentity, owner_id: &str) -> Result<(), DomainError> {
    if identity.role.is_admin() || identity.subject == owner_id {
        return Ok(());
    }
    Err(AuthError::NotResourceOwner.into())
}
