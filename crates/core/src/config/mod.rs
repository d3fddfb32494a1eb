//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (EYERISE_*)
//! 2. TOML config file (if EYERISE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::cache::{DEFAULT_TTL_SECONDS, ExpiringCache, ResponseStore};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (EYERISE_*)
/// 2. TOML config file (if EYERISE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Seconds a cached response may be served before it is evicted.
    ///
    /// Set via EYERISE_TTL_SECONDS environment variable.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// URL substrings for which cache lookups are skipped.
    ///
    /// Set via EYERISE_IGNORED_SUBSTRINGS environment variable (`[a, b]`).
    #[serde(default)]
    pub ignored_substrings: Vec<String>,

    /// Path to SQLite cache database.
    ///
    /// Set via EYERISE_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via EYERISE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per request.
    ///
    /// Set via EYERISE_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via EYERISE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_ttl_seconds() -> u64 {
    DEFAULT_TTL_SECONDS
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./eyerise-cache.sqlite")
}

fn default_user_agent() -> String {
    "eyerise/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            ignored_substrings: Vec::new(),
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `EYERISE_`
    /// 2. TOML file from `EYERISE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("EYERISE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("EYERISE_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Wrap `store` in an [`ExpiringCache`] using this TTL and bypass list.
    pub fn build_cache<S: ResponseStore>(&self, store: S) -> ExpiringCache<S> {
        ExpiringCache::new(store)
            .with_ttl_seconds(self.ttl_seconds)
            .with_ignored_substrings(self.ignored_substrings.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.ttl_seconds, 86_400);
        assert!(config.ignored_substrings.is_empty());
        assert_eq!(config.db_path, PathBuf::from("./eyerise-cache.sqlite"));
        assert_eq!(config.user_agent, "eyerise/0.1");
        assert_eq!(config.max_bytes, 5_242_880);
        assert_eq!(config.timeout_ms, 20_000);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
    }

    #[test]
    fn test_build_cache_applies_policy() {
        let config = AppConfig { ttl_seconds: 60, ignored_substrings: vec!["nocache".into()], ..Default::default() };
        let cache = config.build_cache(MemoryStore::new());
        assert_eq!(cache.ttl_seconds(), 60);
        assert!(cache.is_bypassed("https://example.com/?nocache"));
    }

    #[test]
    fn test_load_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("EYERISE_TTL_SECONDS", "120");
            jail.set_env("EYERISE_IGNORED_SUBSTRINGS", "[nocache, /live/]");
            jail.set_env("EYERISE_USER_AGENT", "tester/1.0");

            let config = AppConfig::load().expect("config loads");
            assert_eq!(config.ttl_seconds, 120);
            assert_eq!(config.ignored_substrings, vec!["nocache".to_string(), "/live/".to_string()]);
            assert_eq!(config.user_agent, "tester/1.0");
            Ok(())
        });
    }

    #[test]
    fn test_load_file_then_env_precedence() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "eyerise.toml",
                r#"
                ttl_seconds = 300
                timeout_ms = 5000
                "#,
            )?;
            jail.set_env("EYERISE_CONFIG_FILE", "eyerise.toml");
            jail.set_env("EYERISE_TIMEOUT_MS", "7000");

            let config = AppConfig::load().expect("config loads");
            assert_eq!(config.ttl_seconds, 300);
            assert_eq!(config.timeout_ms, 7000);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("EYERISE_TTL_SECONDS", "0");
            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "ttl_seconds"));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_unparseable_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("EYERISE_TTL_SECONDS", "soon");
            assert!(matches!(AppConfig::load(), Err(ConfigError::LoadFailed(_))));
            Ok(())
        });
    }
}
