//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ev_api::{AppState, SharedTokenService};
use ev_core::domain::entities::role::Role;
use ev_core::domain::entities::token::TokenPair;
use ev_core::errors::DomainError;
use ev_core::repositories::TokenRepository;
use ev_core::services::token::{TokenService, TokenServiceConfig};
use ev_infra::cache::InMemoryTokenRepository;

pub fn token_config() -> TokenServiceConfig {
    TokenServiceConfig {
        access_secret: "api-test-access-secret-long-enough-0001".to_string(),
        refresh_secret: "api-test-refresh-secret-long-enough-0002".to_string(),
        ..TokenServiceConfig::default()
    }
}

pub fn service_with(store: Arc<dyn TokenRepository>, config: TokenServiceConfig) -> SharedTokenService {
    Arc::new(TokenService::new(store, config).unwrap())
}

/// Application state over a fresh in-memory store
pub fn memory_state() -> (web::Data<AppState>, SharedTokenService) {
    memory_state_with(token_config())
}

pub fn memory_state_with(config: TokenServiceConfig) -> (web::Data<AppState>, SharedTokenService) {
    let service = service_with(Arc::new(InMemoryTokenRepository::new()), config);
    (web::Data::new(AppState::new(service.clone())), service)
}

/// Application state whose store fails every call
pub fn unavailable_state() -> (web::Data<AppState>, SharedTokenService) {
    let service = service_with(Arc::new(UnavailableStore), token_config());
    (web::Data::new(AppState::new(service.clone())), service)
}

pub async fn login(service: &SharedTokenService, subject: &str, role: Role) -> TokenPair {
    service.issue_token_pair(subject, role).await.unwrap()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Token store standing in for an unreachable backend
pub struct UnavailableStore;

fn unavailable() -> DomainError {
    DomainError::internal("token store unavailable")
}

#[async_trait]
impl TokenRepository for UnavailableStore {
    async fn find_refresh_token(&self, _subject: &str) -> Result<Option<String>, DomainError> {
        Err(unavailable())
    }

    async fn save_refresh_token(
        &self,
        _subject: &str,
        _token: &str,
        _expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn rotate_refresh_token(
        &self,
        _subject: &str,
        _current: &str,
        _replacement: &str,
        _expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        Err(unavailable())
    }

    async fn delete_refresh_token(&self, _subject: &str) -> Result<bool, DomainError> {
        Err(unavailable())
    }

    async fn revoke_token(&self, _token: &str, _expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn is_token_revoked(&self, _token: &str) -> Result<bool, DomainError> {
        Err(unavailable())
    }

    async fn count_revoked_tokens(&self) -> Result<usize, DomainError> {
        Err(unavailable())
    }

    async fn purge_expired_revocations(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        Err(unavailable())
    }

    async fn purge_expired_refresh_tokens(
        &self,
        _now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        Err(unavailable())
    }
}
