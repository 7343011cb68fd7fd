use actix_web::{web, HttpResponse};
use ev_core::domain::entities::role::Role;
use ev_core::services::authorize;
use ev_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::dto::auth_dto::{RevokedCountResponse, SessionResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::Authenticated;

/// Handler for GET /api/v1/auth/me
pub async fn current_session(Authenticated(identity): Authenticated) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(SessionResponse { user: identity }))
}

/// Handler for GET /api/v1/auth/revoked-count
///
/// Admin only. Reports how many tokens the revocation set currently holds.
pub async fn revoked_count(
    state: web::Data<AppState>,
    Authenticated(identity): Authenticated,
) -> HttpResponse {
    if let Err(error) = authorize(&identity, &[Role::Admin]) {
        return handle_domain_error(&error);
    }

    match state.token_service.revoked_count().await {
        Ok(count) => HttpResponse::Ok().json(ApiResponse::success(RevokedCountResponse { count })),
        Err(error) => handle_domain_error(&error),
    }
}
