//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (STOREFRONT_*)
//! 2. TOML config file (if STOREFRONT_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (STOREFRONT_*)
/// 2. TOML config file (if STOREFRONT_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL every API path is appended to.
    ///
    /// Set via STOREFRONT_API_BASE_URL environment variable.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via STOREFRONT_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via STOREFRONT_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Lifetime of cached catalog responses in seconds.
    ///
    /// Set via STOREFRONT_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Path to the SQLite file holding the persisted session.
    ///
    /// Set via STOREFRONT_SESSION_DB_PATH environment variable.
    #[serde(default = "default_session_db_path")]
    pub session_db_path: PathBuf,

    /// Location of the login page, the target of auth-expired redirects.
    ///
    /// Set via STOREFRONT_LOGIN_PATH environment variable.
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api".into()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    "storefront/0.1".into()
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_session_db_path() -> PathBuf {
    PathBuf::from("./storefront-session.sqlite")
}

fn default_login_path() -> String {
    "/login".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            cache_ttl_secs: default_cache_ttl_secs(),
            session_db_path: default_session_db_path(),
            login_path: default_login_path(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache TTL as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `STOREFRONT_`
    /// 2. TOML file from `STOREFRONT_CONFIG_FILE` (if set)
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

        if let Ok(config_path) = std::env::var("STOREFRONT_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("STOREFRONT_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000/api");
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.user_agent, "storefront/0.1");
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.session_db_path, PathBuf::from("./storefront-session.sqlite"));
        assert_eq!(config.login_path, "/login");
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(30_000));
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_load_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "storefront.toml",
                r#"
                api_base_url = "https://shop.example.com/api"
                timeout_ms = 5000
                "#,
            )?;
            jail.set_env("STOREFRONT_CONFIG_FILE", "storefront.toml");
            jail.set_env("STOREFRONT_TIMEOUT_MS", "7000");

            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.api_base_url, "https://shop.example.com/api");
            assert_eq!(config.timeout_ms, 7000);
            assert_eq!(config.cache_ttl_secs, 300);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("STOREFRONT_CACHE_TTL_SECS", "0");
            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "cache_ttl_secs"));
            Ok(())
        });
    }
}
