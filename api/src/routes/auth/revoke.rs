use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};
use ev_core::services::token::{extract_bearer_token, RevokeRequest, RevokeScope};
use ev_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::dto::auth_dto::{MessageResponse, RevokeTokensRequest};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::OptionalIdentity;

/// Handler for POST /api/v1/auth/revoke
///
/// Revokes the bearer access token and the refresh token in the body.
/// With `allTokens` and an authenticated caller, the caller's registered
/// refresh token is dropped as well.
///
/// # Request Body
///
/// ```json
/// { "refreshToken": "eyJ...", "allTokens": false }
/// ```
///
/// Both fields are optional; an empty request succeeds without effect.
pub async fn revoke_tokens(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    body: Option<web::Json<RevokeTokensRequest>>,
) -> HttpResponse {
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    let access_token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_bearer_token)
        .map(str::to_owned);

    let request = RevokeRequest {
        access_token,
        refresh_token: body.refresh_token,
        all_tokens: body.all_tokens,
        subject: identity.0.map(|identity| identity.subject),
    };

    match state.token_service.revoke(request).await {
        Ok(scope) => {
            let message = match scope {
                RevokeScope::All => "All tokens revoked successfully",
                RevokeScope::Specific => "Token(s) revoked successfully",
            };
            HttpResponse::Ok().json(ApiResponse::success(MessageResponse {
                message: message.to_string(),
            }))
        }
        Err(error) => handle_domain_error(&error),
    }
}
