//! Periodic sweep of the revocation set and the refresh registry
//!
//! An entry is dropped only after the whole `exp` second of the credential
//! it describes has passed, when that credential fails verification on its
//! own; the sweep never changes what is accepted.

use chrono::{DateTime, Utc};
use ev_shared::CleanupConfig;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::errors::DomainError;
use crate::repositories::TokenRepository;

/// Configuration for token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// Whether to enable automatic cleanup
    pub enabled: bool,
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 3600,
        }
    }
}

impl From<&CleanupConfig> for TokenCleanupConfig {
    fn from(config: &CleanupConfig) -> Self {
        Self {
            enabled: config.enabled,
            interval_seconds: config.interval_seconds,
        }
    }
}

/// Service sweeping expired entries out of the token store
pub struct TokenCleanupService<R: TokenRepository + ?Sized + 'static> {
    repository: Arc<R>,
    config: TokenCleanupConfig,
}

impl<R: TokenRepository + ?Sized + 'static> TokenCleanupService<R> {
    /// Create a new token cleanup service
    pub fn new(repository: Arc<R>, config: TokenCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle against the current time
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        self.run_cleanup_at(Utc::now()).await
    }

    /// Run a single cleanup cycle treating `now` as the current time
    ///
    /// A failing step is recorded in the result and does not stop the
    /// remaining steps.
    pub async fn run_cleanup_at(&self, now: DateTime<Utc>) -> Result<CleanupResult, DomainError> {
        debug!("Starting token cleanup cycle");

        let mut result = CleanupResult::default();

        match self.repository.purge_expired_revocations(now).await {
            Ok(count) => result.expired_revocations_deleted = count,
            Err(e) => {
                error!("Failed to purge revocation set: {}", e);
                result.errors.push(format!("Revocation cleanup error: {}", e));
            }
        }

        match self.repository.purge_expired_refresh_tokens(now).await {
            Ok(count) => result.expired_refresh_tokens_deleted = count,
            Err(e) => {
                error!("Failed to purge refresh registry: {}", e);
                result.errors.push(format!("Refresh registry cleanup error: {}", e));
            }
        }

        match self.repository.count_revoked_tokens().await {
            Ok(count) => result.revoked_remaining = count,
            Err(e) => {
                warn!("Failed to count revoked tokens: {}", e);
                result.errors.push(format!("Revocation count error: {}", e));
            }
        }

        if result.total_cleaned() > 0 {
            info!(
                "Token cleanup completed - Revocations: {}, Refresh tokens: {}, Remaining revoked: {}",
                result.expired_revocations_deleted,
                result.expired_refresh_tokens_deleted,
                result.revoked_remaining
            );
        }

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled. The first sweep runs one
    /// full interval after start.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return None;
        }

        let period = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Token cleanup service started - will run every {} seconds",
                period.as_secs()
            );

            let start = tokio::time::Instant::now() + period;
            let mut interval_timer = tokio::time::interval_at(start, period);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Token cleanup cycle failed: {}", e);
                    }
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired revocation entries deleted
    pub expired_revocations_deleted: usize,
    /// Number of expired refresh registry entries deleted
    pub expired_refresh_tokens_deleted: usize,
    /// Revocation set size after the sweep
    pub revoked_remaining: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get total number of items cleaned up
    pub fn total_cleaned(&self) -> usize {
        self.expired_revocations_deleted + self.expired_refresh_tokens_deleted
    }
}
