//! Bearer authentication middleware and identity extractors.
//!
//! The middleware reads the `Authorization` header, verifies the access token
//! through the shared [`TokenService`](ev_core::TokenService) and stores the
//! resulting [`AuthIdentity`] in the request extensions. Handlers read it back
//! with [`Authenticated`] or [`OptionalIdentity`].
//!
//! Two modes:
//! - required: any missing, expired, malformed or revoked token is rejected
//! - optional: such tokens leave the request anonymous; store failures still fail

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use ev_core::domain::entities::identity::AuthIdentity;
use ev_core::errors::AuthError;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use crate::app::SharedTokenService;
use crate::handlers::error::{handle_domain_error, ApiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Required,
    Optional,
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    token_service: SharedTokenService,
    mode: AuthMode,
}

impl JwtAuth {
    /// Rejects requests without a valid access token
    pub fn required(token_service: SharedTokenService) -> Self {
        Self {
            token_service,
            mode: AuthMode::Required,
        }
    }

    /// Attaches an identity when a valid access token is present
    pub fn optional(token_service: SharedTokenService) -> Self {
        Self {
            token_service,
            mode: AuthMode::Optional,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: self.token_service.clone(),
            mode: self.mode,
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: SharedTokenService,
    mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = self.token_service.clone();
        let mode = self.mode;

        Box::pin(async move {
            let header = authorization_header(&req);

            let outcome = match mode {
                AuthMode::Required => token_service
                    .authenticate(header.as_deref())
                    .await
                    .map(Some),
                AuthMode::Optional => token_service.authenticate_optional(header.as_deref()).await,
            };

            match outcome {
                Ok(identity) => {
                    if let Some(identity) = identity {
                        log::debug!("Authenticated request for subject {}", identity.subject);
                        req.extensions_mut().insert(identity);
                    }
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(error) => {
                    let response = handle_domain_error(&error);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Raw `Authorization` header value, if present and valid UTF-8
fn authorization_header(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()
        .map(str::to_owned)
}

/// Extractor for routes that need an authenticated caller
///
/// Fails with 401 when no identity was attached by [`JwtAuth`].
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthIdentity);

impl FromRequest for Authenticated {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthIdentity>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| ApiError::from(AuthError::NotAuthenticated));

        ready(result)
    }
}

/// Extractor for optional authentication; never fails
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<AuthIdentity>);

impl FromRequest for OptionalIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<AuthIdentity>().cloned();
        ready(Ok(OptionalIdentity(identity)))
    }
}
