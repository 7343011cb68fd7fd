//! Application state and factory
//!
//! This module selects the token store, holds the shared application state
//! and provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};
use ev_core::repositories::TokenRepository;
use ev_core::services::token::TokenService;
use ev_infra::cache::{InMemoryTokenRepository, RedisClient, RedisTokenRepository};
use ev_infra::InfrastructureError;
use ev_shared::config::{CacheConfig, CorsConfig, StoreBackend};
use ev_shared::types::response::HealthResponse;

use crate::handlers::error::not_found;
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::auth::{current_session, refresh_token, revoke_tokens, revoked_count};

/// Token service over whichever store the configuration selected
pub type SharedTokenService = Arc<TokenService<Arc<dyn TokenRepository>>>;

/// Application state shared across handlers
pub struct AppState {
    pub token_service: SharedTokenService,
}

impl AppState {
    pub fn new(token_service: SharedTokenService) -> Self {
        Self { token_service }
    }
}

/// Build the token store named by the cache configuration
pub async fn build_token_store(
    config: &CacheConfig,
) -> Result<Arc<dyn TokenRepository>, InfrastructureError> {
    match config.backend {
        StoreBackend::Memory => {
            log::info!("Using in-memory token store");
            Ok(Arc::new(InMemoryTokenRepository::new()))
        }
        StoreBackend::Redis => {
            let client = RedisClient::new(config).await?;
            log::info!("Using Redis token store");
            Ok(Arc::new(RedisTokenRepository::new(
                client,
                config.key_prefix.clone(),
            )))
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    cors_config: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let token_service = app_state.token_service.clone();

    App::new()
        .app_data(app_state)
        .wrap(create_cors(cors_config))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/auth")
                .route("/refresh", web::post().to(refresh_token))
                .service(
                    web::resource("/revoke")
                        .wrap(JwtAuth::optional(token_service.clone()))
                        .route(web::post().to(revoke_tokens)),
                )
                .service(
                    web::resource("/me")
                        .wrap(JwtAuth::required(token_service.clone()))
                        .route(web::get().to(current_session)),
                )
                .service(
                    web::resource("/revoked-count")
                        .wrap(JwtAuth::required(token_service))
                        .route(web::get().to(revoked_count)),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "eventhub-auth",
        env!("CARGO_PKG_VERSION"),
    ))
}
