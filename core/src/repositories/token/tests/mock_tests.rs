//! Tests for the mock token repository, including the Arc forwarding impl

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::repositories::token::{MockTokenRepository, TokenRepository};

#[tokio::test]
async fn test_save_overwrites_registry_entry() {
    let repo = MockTokenRepository::new();
    let expires_at = Utc::now() + Duration::days(7);

    repo.save_refresh_token("u-1", "first", expires_at).await.unwrap();
    repo.save_refresh_token("u-1", "second", expires_at).await.unwrap();

    assert_eq!(
        repo.find_refresh_token("u-1").await.unwrap(),
        Some("second".to_string())
    );
    assert_eq!(repo.registry_len().await, 1);
}

#[tokio::test]
async fn test_rotate_requires_matching_entry() {
    let repo = MockTokenRepository::new();
    let expires_at = Utc::now() + Duration::days(7);
    repo.save_refresh_token("u-1", "current", expires_at).await.unwrap();

    assert!(!repo
        .rotate_refresh_token("u-1", "stale", "next", expires_at)
        .await
        .unwrap());
    assert!(repo
        .rotate_refresh_token("u-1", "current", "next", expires_at)
        .await
        .unwrap());
    assert!(!repo
        .rotate_refresh_token("u-2", "current", "next", expires_at)
        .await
        .unwrap());
    assert_eq!(
        repo.find_refresh_token("u-1").await.unwrap(),
        Some("next".to_string())
    );
}

#[tokio::test]
async fn test_purge_only_removes_expired_revocations() {
    let repo = MockTokenRepository::new();
    let now = Utc::now();
    repo.revoke_token("old", now - Duration::minutes(1)).await.unwrap();
    repo.revoke_token("fresh", now + Duration::minutes(10)).await.unwrap();

    assert_eq!(repo.purge_expired_revocations(now).await.unwrap(), 1);
    assert!(!repo.is_token_revoked("old").await.unwrap());
    assert!(repo.is_token_revoked("fresh").await.unwrap());
}

#[tokio::test]
async fn test_arc_dyn_forwards_calls() {
    let repo: Arc<dyn TokenRepository> = Arc::new(MockTokenRepository::new());
    let expires_at = Utc::now() + Duration::days(1);

    repo.revoke_token("t", expires_at).await.unwrap();
    assert!(repo.is_token_revoked("t").await.unwrap());
    assert_eq!(repo.count_revoked_tokens().await.unwrap(), 1);
}

#[tokio::test]
async fn test_unavailable_store_fails() {
    let repo = MockTokenRepository::new();
    repo.set_unavailable(true);
    assert!(repo.is_token_revoked("t").await.is_err());

    repo.set_unavailable(false);
    assert!(!repo.is_token_revoked("t").await.unwrap());
}
