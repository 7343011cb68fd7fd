//! Authentication configuration: signing secrets and token lifetimes

use serde::{Deserialize, Serialize};

/// Shortest secret accepted at startup
pub const MIN_SECRET_LENGTH: usize = 32;

/// Longest token lifetime accepted, in seconds (365 days)
pub const MAX_TOKEN_EXPIRY_SECONDS: i64 = 365 * 24 * 60 * 60;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Secret used to sign access tokens
    pub access_secret: String,

    /// Secret used to sign refresh tokens
    pub refresh_secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// Algorithm for JWT signing (default: HS256)
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::new(),
            refresh_secret: String::new(),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration, deriving the refresh secret
    pub fn new(secret: impl Into<String>) -> Self {
        let access_secret = secret.into();
        Self {
            refresh_secret: derive_refresh_secret(&access_secret),
            access_secret,
            ..Default::default()
        }
    }

    /// Reject secrets that are missing, too short, or still placeholders
    pub fn validate(&self) -> Result<(), String> {
        for (name, secret) in [
            ("JWT_SECRET", &self.access_secret),
            ("JWT_REFRESH_SECRET", &self.refresh_secret),
        ] {
            let trimmed = secret.trim();
            if trimmed.is_empty() {
                return Err(format!("{} is required", name));
            }
            if trimmed.contains("your-") || trimmed.contains("change-this") {
                return Err(format!("{} still holds a placeholder value", name));
            }
            if trimmed.len() < MIN_SECRET_LENGTH {
                return Err(format!(
                    "{} must be at least {} characters long",
                    name, MIN_SECRET_LENGTH
                ));
            }
        }
        if self.access_secret == self.refresh_secret {
            return Err("JWT_SECRET and JWT_REFRESH_SECRET must differ".to_string());
        }
        if self.access_token_expiry <= 0 || self.refresh_token_expiry <= 0 {
            return Err("token expiry values must be positive".to_string());
        }
        if self.access_token_expiry > MAX_TOKEN_EXPIRY_SECONDS
            || self.refresh_token_expiry > MAX_TOKEN_EXPIRY_SECONDS
        {
            return Err(format!(
                "token expiry values must not exceed {} seconds",
                MAX_TOKEN_EXPIRY_SECONDS
            ));
        }
        Ok(())
    }
}

/// Revocation sweep configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Whether the background sweep runs at all
    pub enabled: bool,

    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 3600, // Run every hour
        }
    }
}

fn derive_refresh_secret(access_secret: &str) -> String {
    format!("{}_refresh", access_secret)
}

fn default_algorithm() -> String {
    String::from("HS256")
}
