//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Longest accepted TTL (one year).
const MAX_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `ttl_seconds` is 0 or exceeds one year
    /// - `ignored_substrings` contains an empty entry
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl_seconds == 0 {
            return Err(ConfigError::Invalid { field: "ttl_seconds".into(), reason: "must be greater than 0".into() });
        }
        if self.ttl_seconds > MAX_TTL_SECONDS {
            return Err(ConfigError::Invalid {
                field: "ttl_seconds".into(),
                reason: format!("must not exceed one year ({MAX_TTL_SECONDS}s)"),
            });
        }

        // An empty substring is contained in every URL and would disable all lookups.
        if self.ignored_substrings.iter().any(String::is_empty) {
            return Err(ConfigError::Invalid {
                field: "ignored_substrings".into(),
                reason: "entries must not be empty".into(),
            });
        }

        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.ttl_seconds < 60 {
            tracing::warn!(
                ttl_seconds = self.ttl_seconds,
                "ttl_seconds is under a minute; most cached responses will be evicted before reuse"
            );
        }

        Ok(())
    }
}
