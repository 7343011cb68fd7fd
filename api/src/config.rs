//! Layered configuration loading
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. optional `config.<environment>` file (toml, yaml or json)
//! 3. `EVENTHUB__SECTION__KEY` environment variables
//! 4. the flat variables documented for deployment (`JWT_SECRET`, `PORT`, ...)

use config::{Config as ConfigSource, ConfigError, File};
use ev_shared::config::{AppConfig, CorsConfig, Environment, StoreBackend};

/// Flat environment variables and the configuration key each one sets
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("JWT_SECRET", "jwt.access_secret"),
    ("JWT_REFRESH_SECRET", "jwt.refresh_secret"),
    ("JWT_ACCESS_TOKEN_EXPIRY", "jwt.access_token_expiry"),
    ("JWT_REFRESH_TOKEN_EXPIRY", "jwt.refresh_token_expiry"),
    ("JWT_ALGORITHM", "jwt.algorithm"),
    ("REDIS_URL", "cache.url"),
    ("REDIS_KEY_PREFIX", "cache.key_prefix"),
    ("SERVER_HOST", "server.host"),
    ("PORT", "server.port"),
    ("SERVER_PORT", "server.port"),
    ("SERVER_WORKERS", "server.workers"),
    ("TOKEN_CLEANUP_ENABLED", "cleanup.enabled"),
    ("TOKEN_CLEANUP_INTERVAL", "cleanup.interval_seconds"),
    ("LOG_LEVEL", "logging.level"),
];

/// Load configuration from the process environment and validate it
pub fn load() -> Result<AppConfig, ConfigError> {
    load_from(|name| std::env::var(name).ok())
}

/// Load configuration reading variables through `lookup`
pub fn load_from<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let environment = ["ENVIRONMENT", "ENV", "RUST_ENV"]
        .iter()
        .find_map(|name| lookup(name))
        .and_then(|value| value.parse::<Environment>().ok())
        .unwrap_or_default();

    let mut defaults = AppConfig::default();
    defaults.environment = environment;
    defaults.logging = ev_shared::config::LoggingConfig::for_environment(environment);

    let mut builder = ConfigSource::builder()
        .add_source(ConfigSource::try_from(&defaults)?)
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(
            config::Environment::with_prefix("EVENTHUB")
                .prefix_separator("__")
                .separator("__"),
        );

    for (name, key) in ENV_OVERRIDES {
        if let Some(value) = lookup(name).filter(|v| !v.is_empty()) {
            builder = builder.set_override(*key, value)?;
        }
    }

    if lookup("JWT_REFRESH_SECRET").is_none() {
        if let Some(secret) = lookup("JWT_SECRET").filter(|v| !v.is_empty()) {
            builder = builder.set_override("jwt.refresh_secret", format!("{}_refresh", secret))?;
        }
    }

    if let Some(store) = lookup("TOKEN_STORE") {
        let backend: StoreBackend = store.parse().map_err(ConfigError::Message)?;
        let name = match backend {
            StoreBackend::Memory => "memory",
            StoreBackend::Redis => "redis",
        };
        builder = builder.set_override("cache.backend", name)?;
    }

    if let Some(origins) = lookup("CORS_ORIGIN") {
        builder =
            builder.set_override("cors.allowed_origins", CorsConfig::parse_origins(&origins))?;
    }

    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.validate().map_err(ConfigError::Message)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "a-very-long-secret-used-only-in-tests-0001";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        assert!(load_from(lookup(&[])).is_err());
    }

    #[test]
    fn test_defaults_with_secret() {
        let config = load_from(lookup(&[("JWT_SECRET", SECRET)])).unwrap();

        assert_eq!(config.jwt.access_secret, SECRET);
        assert_eq!(config.jwt.refresh_secret, format!("{}_refresh", SECRET));
        assert_eq!(config.jwt.access_token_expiry, 900);
        assert_eq!(config.jwt.refresh_token_expiry, 604800);
        assert_eq!(config.cache.backend, StoreBackend::Memory);
        assert!(config.cleanup.enabled);
        assert_eq!(config.cleanup.interval_seconds, 3600);
    }

    #[test]
    fn test_flat_variables_override_defaults() {
        let config = load_from(lookup(&[
            ("JWT_SECRET", SECRET),
            ("JWT_REFRESH_SECRET", "another-very-long-secret-for-refresh-0002"),
            ("JWT_ACCESS_TOKEN_EXPIRY", "600"),
            ("PORT", "8081"),
            ("TOKEN_STORE", "redis"),
            ("REDIS_URL", "redis://cache:6379"),
            ("CORS_ORIGIN", "https://a.example, https://b.example"),
            ("TOKEN_CLEANUP_ENABLED", "false"),
        ]))
        .unwrap();

        assert_eq!(config.jwt.refresh_secret, "another-very-long-secret-for-refresh-0002");
        assert_eq!(config.jwt.access_token_expiry, 600);
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.cache.backend, StoreBackend::Redis);
        assert_eq!(config.cache.url, "redis://cache:6379");
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(!config.cleanup.enabled);
    }

    #[test]
    fn test_invalid_store_backend() {
        let result = load_from(lookup(&[("JWT_SECRET", SECRET), ("TOKEN_STORE", "sqlite")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_environment_selects_logging_level() {
        let config = load_from(lookup(&[
            ("JWT_SECRET", SECRET),
            ("ENVIRONMENT", "production"),
        ]))
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(
            config.logging.level,
            ev_shared::config::LoggingConfig::for_environment(Environment::Production).level
        );
    }
}
