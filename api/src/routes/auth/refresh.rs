use actix_web::{web, HttpResponse};
use ev_core::errors::{DomainError, TokenError};
use ev_shared::types::response::ApiResponse;
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth_dto::RefreshTokenRequest;
use crate::handlers::error::handle_domain_error;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new pair; the presented token is revoked.
///
/// # Request Body
///
/// ```json
/// { "refreshToken": "eyJ..." }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "accessToken": "eyJ...",
///     "refreshToken": "eyJ...",
///     "expiresIn": 900,
///     "tokenType": "Bearer"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: No refresh token, or it has been revoked
/// - 403 Forbidden: Refresh token invalid, expired or superseded
/// - 500 Internal Server Error: Token store unavailable
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse {
    let request = match request.map(web::Json::into_inner) {
        Some(request) if request.validate().is_ok() => request,
        _ => return handle_domain_error(&DomainError::Token(TokenError::MissingRefreshToken)),
    };

    match state.token_service.refresh(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(ApiResponse::success(pair)),
        Err(error) => handle_domain_error(&error),
    }
}
