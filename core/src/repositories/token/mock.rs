//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::r#trait::{is_entry_expired, TokenRepository};

#[derive(Default)]
struct MockState {
    refresh_tokens: HashMap<String, (String, DateTime<Utc>)>,
    revoked: HashMap<String, DateTime<Utc>>,
}

/// Mock token repository for testing
///
/// `set_unavailable(true)` makes every call fail, simulating a store outage.
#[derive(Clone)]
pub struct MockTokenRepository {
    state: Arc<RwLock<MockState>>,
    unavailable: Arc<AtomicBool>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockState::default())),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Toggle simulated store failures
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of registered refresh tokens
    pub async fn registry_len(&self) -> usize {
        self.state.read().await.refresh_tokens.len()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::internal("mock token store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn find_refresh_token(&self, subject: &str) -> Result<Option<String>, DomainError> {
        self.check()?;
        let state = self.state.read().await;
        Ok(state.refresh_tokens.get(subject).map(|(t, _)| t.clone()))
    }

    async fn save_refresh_token(
        &self,
        subject: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.check()?;
        let mut state = self.state.write().await;
        state
            .refresh_tokens
            .insert(subject.to_string(), (token.to_string(), expires_at));
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        subject: &str,
        current: &str,
        replacement: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.check()?;
        let mut state = self.state.write().await;
        match state.refresh_tokens.get_mut(subject) {
            Some(entry) if entry.0 == current => {
                *entry = (replacement.to_string(), expires_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_refresh_token(&self, subject: &str) -> Result<bool, DomainError> {
        self.check()?;
        let mut state = self.state.write().await;
        Ok(state.refresh_tokens.remove(subject).is_some())
    }

    async fn revoke_token(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        self.check()?;
        let mut state = self.state.write().await;
        state.revoked.insert(token.to_string(), expires_at);
        Ok(())
    }

    async fn is_token_revoked(&self, token: &str) -> Result<bool, DomainError> {
        self.check()?;
        let state = self.state.read().await;
        Ok(state.revoked.contains_key(token))
    }

    async fn count_revoked_tokens(&self) -> Result<usize, DomainError> {
        self.check()?;
        Ok(self.state.read().await.revoked.len())
    }

    async fn purge_expired_revocations(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        self.check()?;
        let mut state = self.state.write().await;
        let before = state.revoked.len();
        state.revoked.retain(|_, expires_at| !is_entry_expired(*expires_at, now));
        Ok(before - state.revoked.len())
    }

    async fn purge_expired_refresh_tokens(
        &self,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        self.check()?;
        let mut state = self.state.write().await;
        let before = state.refresh_tokens.len();
        state.refresh_tokens.retain(|_, (_, expires_at)| !is_entry_expired(*expires_at, now));
        Ok(before - state.refresh_tokens.len())
    }
}
