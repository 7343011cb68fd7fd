//! Redis-backed token store
//!
//! Key patterns (all under the configured prefix):
//! - `{prefix}refresh:{subject}` - the subject's current refresh token
//! - `{prefix}revoked:{sha256(token)}` - revocation marker
//!
//! Every key carries a TTL equal to the remaining lifetime of the
//! credential it describes, so Redis drops expired entries itself and the
//! purge operations have nothing left to do.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::Script;
use sha2::{Digest, Sha256};
use tracing::debug;

use ev_core::errors::DomainError;
use ev_core::repositories::TokenRepository;

use crate::cache::RedisClient;

/// Replace KEYS[1] with ARGV[2] (TTL ARGV[3]) only if it still holds ARGV[1]
const ROTATE_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    redis.call('SET', KEYS[1], ARGV[2], 'EX', ARGV[3])
    return 1
end
return 0
"#;

/// Token store shared by every instance pointing at the same Redis
#[derive(Clone)]
pub struct RedisTokenRepository {
    client: RedisClient,
    key_prefix: String,
    rotate_script: Script,
}

impl RedisTokenRepository {
    pub fn new(client: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
            rotate_script: Script::new(ROTATE_SCRIPT),
        }
    }

    fn refresh_key(&self, subject: &str) -> String {
        format!("{}refresh:{}", self.key_prefix, subject)
    }

    fn revoked_key(&self, token: &str) -> String {
        format!("{}revoked:{}", self.key_prefix, hash_token(token))
    }

    fn revoked_pattern(&self) -> String {
        format!("{}revoked:*", self.key_prefix)
    }
}

/// Fixed-size key material for arbitrary-length credential strings
pub(crate) fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Key TTL for a credential expiring at `expires_at`
///
/// Rounded up to whole seconds, plus the second in which `exp` still
/// verifies. At least one so the key is still written.
pub(crate) fn ttl_seconds(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let remaining_ms = (expires_at - now).num_milliseconds();
    let remaining = remaining_ms.div_euclid(1000) + i64::from(remaining_ms.rem_euclid(1000) > 0);
    (remaining + 1).max(1) as u64
}

#[async_trait]
impl TokenRepository for RedisTokenRepository {
    async fn find_refresh_token(&self, subject: &str) -> Result<Option<String>, DomainError> {
        Ok(self.client.get(&self.refresh_key(subject)).await?)
    }

    async fn save_refresh_token(
        &self,
        subject: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let ttl = ttl_seconds(expires_at, Utc::now());
        self.client
            .set_with_expiry(&self.refresh_key(subject), token, ttl)
            .await?;
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        subject: &str,
        current: &str,
        replacement: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let key = self.refresh_key(subject);
        let ttl = ttl_seconds(expires_at, Utc::now());
        let swapped = self
            .client
            .eval_int(
                &self.rotate_script,
                &[key.as_str()],
                &[current.to_string(), replacement.to_string(), ttl.to_string()],
            )
            .await?;

        if swapped != 1 {
            debug!(subject, "Refresh registration changed before rotation");
        }
        Ok(swapped == 1)
    }

    async fn delete_refresh_token(&self, subject: &str) -> Result<bool, DomainError> {
        Ok(self.client.delete(&self.refresh_key(subject)).await?)
    }

    async fn revoke_token(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        let ttl = ttl_seconds(expires_at, Utc::now());
        self.client
            .set_with_expiry(&self.revoked_key(token), "1", ttl)
            .await?;
        Ok(())
    }

    async fn is_token_revoked(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.revoked_key(token)).await?)
    }

    async fn count_revoked_tokens(&self) -> Result<usize, DomainError> {
        Ok(self.client.count_matching(&self.revoked_pattern()).await?)
    }

    async fn purge_expired_revocations(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        Ok(0)
    }

    async fn purge_expired_refresh_tokens(
        &self,
        _now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        Ok(0)
    }
}
