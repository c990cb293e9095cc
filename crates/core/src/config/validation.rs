//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;
use url::Url;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `api_base_url` is not an absolute http(s) URL
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `cache_ttl_secs` is 0
    ///
    /// Returns `ConfigError::Missing` if `login_path` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = Url::parse(&self.api_base_url).map_err(|e| ConfigError::Invalid {
            field: "api_base_url".into(),
            reason: e.to_string(),
        })?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ConfigError::Invalid {
                field: "api_base_url".into(),
                reason: format!("unsupported scheme: {}", base.scheme()),
            });
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

        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_ttl_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.login_path.is_empty() {
            return Err(ConfigError::Missing {
                field: "login_path".into(),
                hint: "Set STOREFRONT_LOGIN_PATH environment variable".into(),
            });
        }

        if base.path().ends_with('/') && base.path() != "/" {
            tracing::warn!(
                api_base_url = %self.api_base_url,
                "api_base_url ends with a slash; request paths will contain '//'"
            );
        }

        Ok(())
    }
}
