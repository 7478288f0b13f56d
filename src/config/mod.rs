//! # Configuration
//!
//! Typed configuration for the backend API connection, the batch generator, the
//! scheduled trigger and the web server.
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`FARM_ADMIN__<SECTION>__<KEY>`, plus `CRON_SECRET` and
//!    `NEXT_PUBLIC_BaseUrl`)
//! 2. Config file (`./farm-admin.toml`, `./config/farm-admin.toml`, `~/.farm-admin/config.toml`)
//! 3. Default values
//!
//! ```rust,no_run
//! use farm_admin::config::AdminConfig;
//!
//! let config = AdminConfig::load().expect("Failed to load config");
//! println!("Backend: {}", config.api.base_url);
//! println!("Workers: {}", config.generator.concurrency_limit);
//! ```

pub mod loader;

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONCURRENCY_LIMIT, DEFAULT_API_TIMEOUT_MS, DEFAULT_CALL_TIMEOUT_MS, MAX_READ_RETRIES,
};
use crate::error::{AdminError, AdminResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub api: ApiEndpointConfig,
    pub generator: GeneratorConfig,
    pub cron: CronConfig,
    pub web: WebConfig,
}

/// Connection settings for the backend REST API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEndpointConfig {
    /// Base URL including the API prefix (e.g., "<https://api.example.com/api>")
    pub base_url: String,
    /// Request timeout in milliseconds; must stay below `generator.call_timeout_ms`
    pub timeout_ms: u64,
    /// Maximum retry attempts for failed reads; creates are never retried
    pub max_retries: u32,
    /// Bearer token sent to the backend (if required)
    pub auth_token: Option<String>,
}

impl Default for ApiEndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_ms: DEFAULT_API_TIMEOUT_MS,
            max_retries: 3,
            auth_token: None,
        }
    }
}

/// What the generator does when an existence check itself fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistencePolicy {
    /// Treat the instance as missing and create it (may duplicate)
    #[default]
    FailOpen,
    /// Record the date as failed and create nothing
    FailClosed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub concurrency_limit: usize,
    pub existence_policy: ExistencePolicy,
    pub call_timeout_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: CONCURRENCY_LIMIT,
            existence_policy: ExistencePolicy::FailOpen,
            call_timeout_ms: DEFAULT_CALL_TIMEOUT_MS,
        }
    }
}

impl GeneratorConfig {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CronConfig {
    /// Shared secret expected as `Authorization: Bearer <secret>`; unset disables the check
    pub secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind_address: String,
    pub request_timeout_ms: u64,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            request_timeout_ms: 300_000,
        }
    }
}

impl AdminConfig {
    pub fn validate(&self) -> AdminResult<()> {
        Url::parse(&self.api.base_url).map_err(|e| {
            AdminError::config_error(format!("Invalid base URL '{}': {}", self.api.base_url, e))
        })?;

        if self.generator.concurrency_limit == 0 {
            return Err(AdminError::config_error(
                "generator.concurrency_limit must be at least 1",
            ));
        }
        if self.generator.call_timeout_ms == 0 || self.api.timeout_ms == 0 {
            return Err(AdminError::config_error("timeouts must be greater than zero"));
        }
        if self.api.timeout_ms >= self.generator.call_timeout_ms {
            return Err(AdminError::config_error(format!(
                "api.timeout_ms ({}) must be lower than generator.call_timeout_ms ({})",
                self.api.timeout_ms, self.generator.call_timeout_ms
            )));
        }
        if self.api.max_retries > MAX_READ_RETRIES {
            return Err(AdminError::config_error(format!(
                "api.max_retries must be at most {MAX_READ_RETRIES}"
            )));
        }
        Ok(())
    }

    /// Copy with secrets masked, for `config show` and debug logging
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        if config.api.auth_token.is_some() {
            config.api.auth_token = Some("***".to_string());
        }
        if config.cron.secret.is_some() {
            config.cron.secret = Some("***".to_string());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AdminConfig::default();
        assert_eq!(config.generator.concurrency_limit, 3);
        assert_eq!(config.generator.existence_policy, ExistencePolicy::FailOpen);
        assert!(config.cron.secret.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AdminConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(AdminError::Configuration(_))
        ));

        let mut config = AdminConfig::default();
        config.generator.concurrency_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_api_timeout_below_call_timeout() {
        let mut config = AdminConfig::default();
        assert!(config.api.timeout_ms < config.generator.call_timeout_ms);

        config.api.timeout_ms = config.generator.call_timeout_ms;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api.timeout_ms"));

        config.api.timeout_ms = 30_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_read_retries() {
        let mut config = AdminConfig::default();
        config.api.max_retries = MAX_READ_RETRIES;
        assert!(config.validate().is_ok());

        config.api.max_retries = 100;
        assert!(matches!(
            config.validate(),
            Err(AdminError::Configuration(_))
        ));
    }

    #[test]
    fn test_sanitized_masks_secrets() {
        let mut config = AdminConfig::default();
        config.cron.secret = Some("hunter2".to_string());
        let sanitized = config.sanitized();
        assert_eq!(sanitized.cron.secret.as_deref(), Some("***"));
        assert!(sanitized.api.auth_token.is_none());
    }

    #[test]
    fn test_existence_policy_serialization() {
        let toml_str = toml::to_string(&GeneratorConfig {
            existence_policy: ExistencePolicy::FailClosed,
            ..GeneratorConfig::default()
        })
        .unwrap();
        assert!(toml_str.contains("existence_policy = \"fail_closed\""));
    }
}
