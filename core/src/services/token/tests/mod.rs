//! Tests for the token lifecycle service


use crate::repositories::MockTokenRepository;
use crate::services::token::{TokenService, TokenServiceConfig};

pub(super) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig {
        access_secret: "test-access-secret-that-is-long-enough-123".to_string(),
        refresh_secret: "test-refresh-secret-that-is-long-enough-456".to_string(),
        ..TokenServiceConfig::default()
    }
}

/// Service plus a handle on the same mock store
pub(super) fn create_service() -> (TokenService<MockTokenRepository>, MockTokenRepository) {
    let repository = MockTokenRepository::new();
    let service = TokenService::new(repository.clone(), test_config()).unwrap();
    (service, repository)
}

pub(super) fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
