use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use log::info;

use ev_api::{build_token_store, config, create_app, AppState};
use ev_core::services::token::{
    TokenCleanupConfig, TokenCleanupService, TokenService, TokenServiceConfig,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = config::load().context("Invalid configuration")?;

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.logging.level.as_str()),
    );

    info!(
        "Starting EventHub auth server ({} environment)",
        config.environment
    );

    let store = build_token_store(&config.cache)
        .await
        .context("Failed to initialize token store")?;

    let token_config = TokenServiceConfig::try_from(&config.jwt)?;
    let token_service = Arc::new(TokenService::new(store.clone(), token_config)?);

    let cleanup = Arc::new(TokenCleanupService::new(
        store,
        TokenCleanupConfig::from(&config.cleanup),
    ));
    let cleanup_task = cleanup.start_background_task();

    let app_state = web::Data::new(AppState::new(token_service));
    let cors_config = config.cors.clone();
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone(), &cors_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    if let Some(task) = cleanup_task {
        task.abort();
    }
    info!("Server stopped");
    Ok(())
}
