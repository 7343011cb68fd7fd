//! Mapping of domain errors onto HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use ev_core::errors::{AuthError, DomainError, TokenError};
use ev_shared::errors::{error_codes, ErrorResponse};

/// HTTP status for a domain error
///
/// Missing or revoked credentials are 401; credentials that are present
/// but unusable, and permission failures, are 403.
pub fn status_code_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Token(token_error) => match token_error {
            TokenError::MissingToken
            | TokenError::MissingRefreshToken
            | TokenError::TokenRevoked => StatusCode::UNAUTHORIZED,
            TokenError::TokenExpired
            | TokenError::TokenMalformed
            | TokenError::InvalidRefreshToken => StatusCode::FORBIDDEN,
            TokenError::TokenGenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        },
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions { .. } | AuthError::NotResourceOwner => {
                StatusCode::FORBIDDEN
            }
        },
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error payload for a domain error
///
/// Internal failures get a generic message; their detail only goes to the log.
pub fn error_response_for(error: &DomainError) -> ErrorResponse {
    match error {
        DomainError::Internal { .. } => {
            ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error")
        }
        DomainError::Auth(AuthError::InsufficientPermissions { required, current }) => {
            ErrorResponse::new(error.error_code(), error.to_string()).with_roles(
                required.iter().map(|role| role.to_string()).collect(),
                current.to_string(),
            )
        }
        _ => ErrorResponse::new(error.error_code(), error.to_string()),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_code_for(error);
    if status.is_server_error() {
        log::error!("Request failed: {}", error);
    } else {
        log::warn!("Request rejected: {} ({})", error.error_code(), status.as_u16());
    }

    HttpResponse::build(status).json(error_response_for(error))
}

/// Domain error usable as an actix error, e.g. from extractors
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        ApiError(error.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        ApiError(error.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_code_for(&self.0)
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
