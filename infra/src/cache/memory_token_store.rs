//! In-memory token store
//!
//! Keeps the refresh registry and the revocation set in process-local maps
//! behind a single lock. State is lost on restart and is not shared between
//! processes; use the Redis store for multi-instance deployments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use ev_core::errors::DomainError;
use ev_core::repositories::{is_entry_expired, TokenRepository};

#[derive(Debug, Default)]
struct TokenState {
    /// subject -> (refresh token, expiry)
    refresh_tokens: HashMap<String, (String, DateTime<Utc>)>,
    /// token -> expiry of the revoked credential
    revoked: HashMap<String, DateTime<Utc>>,
}

/// Process-local token store
///
/// One lock guards both maps so a rotation's compare and write happen
/// under the same exclusive guard.
#[derive(Debug, Default)]
pub struct InMemoryTokenRepository {
    state: RwLock<TokenState>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn find_refresh_token(&self, subject: &str) -> Result<Option<String>, DomainError> {
        let state = self.state.read().await;
        Ok(state.refresh_tokens.get(subject).map(|(token, _)| token.clone()))
    }

    async fn save_refresh_token(
        &self,
        subject: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
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
        let mut state = self.state.write().await;
        Ok(state.refresh_tokens.remove(subject).is_some())
    }

    async fn revoke_token(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        // Keep the later expiry if the same string is revoked twice
        let entry = state.revoked.entry(token.to_string()).or_insert(expires_at);
        if *entry < expires_at {
            *entry = expires_at;
        }
        Ok(())
    }

    async fn is_token_revoked(&self, token: &str) -> Result<bool, DomainError> {
        let state = self.state.read().await;
        Ok(state.revoked.contains_key(token))
    }

    async fn count_revoked_tokens(&self) -> Result<usize, DomainError> {
        Ok(self.state.read().await.revoked.len())
    }

    async fn purge_expired_revocations(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut state = self.state.write().await;
        let before = state.revoked.len();
        state.revoked.retain(|_, expires_at| !is_entry_expired(*expires_at, now));
        let removed = before - state.revoked.len();
        debug!(removed, "Purged expired revocations");
        Ok(removed)
    }

    async fn purge_expired_refresh_tokens(
        &self,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let mut state = self.state.write().await;
        let before = state.refresh_tokens.len();
        state.refresh_tokens.retain(|_, (_, expires_at)| !is_entry_expired(*expires_at, now));
        let removed = before - state.refresh_tokens.len();
        debug!(removed, "Purged expired refresh registrations");
        Ok(removed)
    }
}
