//! Token store trait: the refresh registry and the revocation set.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::errors::DomainError;

/// Whether a store entry for a credential expiring at `expires_at` may be dropped
///
/// `exp` has whole-second precision and verification accepts the credential
/// for the whole of that second, so the entry has to outlive it by one second.
pub fn is_entry_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= expires_at + Duration::seconds(1)
}

/// Repository trait for the token lifecycle's mutable state
///
/// Two pieces of state live behind this trait:
/// - the refresh registry, mapping a subject to the one refresh token
///   currently accepted for it
/// - the revocation set, holding credential strings that must be
///   rejected regardless of their signature
///
/// Every entry carries the expiry of the credential it describes so
/// implementations can drop it once the credential would fail
/// verification on its own.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Current registry entry for a subject
    ///
    /// # Returns
    /// * `Ok(Some(token))` - The refresh token currently accepted for the subject
    /// * `Ok(None)` - No refresh token registered
    /// * `Err(DomainError)` - Store failure
    async fn find_refresh_token(&self, subject: &str) -> Result<Option<String>, DomainError>;

    /// Register `token` as the subject's refresh token, replacing any previous entry
    async fn save_refresh_token(
        &self,
        subject: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Atomically replace the subject's entry if it still equals `current`
    ///
    /// # Returns
    /// * `Ok(true)` - Entry matched and was replaced
    /// * `Ok(false)` - Entry missing or superseded; nothing written
    /// * `Err(DomainError)` - Store failure
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::{Duration, Utc};
    /// # use ev_core::repositories::TokenRepository;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let expires_at = Utc::now() + Duration::days(7);
    /// if !repo.rotate_refresh_token("user-1", "old", "new", expires_at).await? {
    ///     println!("refresh token was already rotated");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn rotate_refresh_token(
        &self,
        subject: &str,
        current: &str,
        replacement: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Remove the subject's registry entry
    ///
    /// # Returns
    /// * `Ok(true)` - An entry was removed
    /// * `Ok(false)` - No entry existed
    async fn delete_refresh_token(&self, subject: &str) -> Result<bool, DomainError>;

    /// Add a credential string to the revocation set
    async fn revoke_token(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Check revocation set membership
    async fn is_token_revoked(&self, token: &str) -> Result<bool, DomainError>;

    /// Number of entries in the revocation set
    async fn count_revoked_tokens(&self) -> Result<usize, DomainError>;

    /// Drop revocation entries whose credential expired before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    async fn purge_expired_revocations(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Drop registry entries whose refresh token expired before `now`
    async fn purge_expired_refresh_tokens(&self, now: DateTime<Utc>)
        -> Result<usize, DomainError>;
}

#[async_trait]
impl<T: TokenRepository + ?Sized> TokenRepository for Arc<T> {
    async fn find_refresh_token(&self, subject: &str) -> Result<Option<String>, DomainError> {
        (**self).find_refresh_token(subject).await
    }

    async fn save_refresh_token(
        &self,
        subject: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        (**self).save_refresh_token(subject, token, expires_at).await
    }

    async fn rotate_refresh_token(
        &self,
        subject: &str,
        current: &str,
        replacement: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        (**self)
            .rotate_refresh_token(subject, current, replacement, expires_at)
            .await
    }

    async fn delete_refresh_token(&self, subject: &str) -> Result<bool, DomainError> {
        (**self).delete_refresh_token(subject).await
    }

    async fn revoke_token(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        (**self).revoke_token(token, expires_at).await
    }

    async fn is_token_revoked(&self, token: &str) -> Result<bool, DomainError> {
        (**self).is_token_revoked(token).await
    }

    async fn count_revoked_tokens(&self) -> Result<usize, DomainError> {
        (**self).count_revoked_tokens().await
    }

    async fn purge_expired_revocations(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        (**self).purge_expired_revocations(now).await
    }

    async fn purge_expired_refresh_tokens(
        &self,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        (**self).purge_expired_refresh_tokens(now).await
    }
}
