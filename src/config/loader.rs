//! Configuration Loader
//!
//! Layers defaults, an optional TOML file and environment variables with the
//! `config` crate, then applies the two variables the legacy deployment
//! used (`NEXT_PUBLIC_BaseUrl` and `CRON_SECRET`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use super::AdminConfig;
use crate::error::{AdminError, AdminResult};

const ENV_PREFIX: &str = "FARM_ADMIN";
const ENV_SEPARATOR: &str = "__";
const LEGACY_BASE_URL: &str = "NEXT_PUBLIC_BaseUrl";
const LEGACY_CRON_SECRET: &str = "CRON_SECRET";

impl AdminConfig {
    /// Load configuration from the discovered config file and the process environment
    pub fn load() -> AdminResult<Self> {
        let path = Self::find_config_file();
        Self::load_from(path.as_deref(), None)
    }

    /// Load configuration from a specific file (required to exist) and the process environment
    pub fn load_from_file(path: &Path) -> AdminResult<Self> {
        if !path.is_file() {
            return Err(AdminError::config_error(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Self::load_from(Some(path), None)
    }

    /// Load with an explicit environment snapshot instead of the process environment
    ///
    /// Passing `Some(vars)` keeps tests independent of the global environment.
    pub fn load_from(
        path: Option<&Path>,
        vars: Option<HashMap<String, String>>,
    ) -> AdminResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            debug!(path = %path.display(), "Loading config file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let lookup = EnvLookup::new(vars);
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(Some(lookup.prefixed())),
        );

        let mut config: AdminConfig = builder.build()?.try_deserialize()?;
        lookup.apply_legacy_overrides(&mut config);
        config.validate()?;

        debug!(config = ?config.sanitized(), "Loaded admin configuration");
        Ok(config)
    }

    /// Find the config file in standard locations
    pub fn find_config_file() -> Option<PathBuf> {
        let mut candidates = vec![
            PathBuf::from("./farm-admin.toml"),
            PathBuf::from("./config/farm-admin.toml"),
        ];
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".farm-admin").join("config.toml"));
        }

        candidates.into_iter().find(|path| path.is_file())
    }

    pub fn to_toml(&self) -> AdminResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AdminError::config_error(format!("Failed to serialize config: {e}")))
    }
}

/// Environment snapshot shared by the prefixed source and the legacy overrides
struct EnvLookup {
    vars: HashMap<String, String>,
}

impl EnvLookup {
    fn new(vars: Option<HashMap<String, String>>) -> Self {
        Self {
            vars: vars.unwrap_or_else(|| std::env::vars().collect()),
        }
    }

    fn prefixed(&self) -> config::Map<String, String> {
        let prefix = format!("{ENV_PREFIX}{ENV_SEPARATOR}");
        self.vars
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    fn apply_legacy_overrides(&self, config: &mut AdminConfig) {
        let prefixed_base_url = format!("{ENV_PREFIX}{ENV_SEPARATOR}API{ENV_SEPARATOR}BASE_URL");
        if self.get(&prefixed_base_url).is_none() {
            if let Some(url) = self.get(LEGACY_BASE_URL) {
                config.api.base_url = url.to_string();
            }
        }
        if let Some(secret) = self.get(LEGACY_CRON_SECRET) {
            config.cron.secret = Some(secret.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExistencePolicy;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = AdminConfig::load_from(None, env(&[])).unwrap();
        assert_eq!(config, AdminConfig::default());
    }

    #[test]
    fn test_file_then_env_precedence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("farm-admin.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "https://file.example.com/api"
max_retries = 5

[generator]
concurrency_limit = 4
existence_policy = "fail_closed"
"#,
        )
        .unwrap();

        let config = AdminConfig::load_from(
            Some(&path),
            env(&[("FARM_ADMIN__GENERATOR__CONCURRENCY_LIMIT", "6")]),
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://file.example.com/api");
        assert_eq!(config.api.max_retries, 5);
        assert_eq!(config.generator.concurrency_limit, 6);
        assert_eq!(config.generator.existence_policy, ExistencePolicy::FailClosed);
    }

    #[test]
    fn test_legacy_variables() {
        let config = AdminConfig::load_from(
            None,
            env(&[
                ("NEXT_PUBLIC_BaseUrl", "https://legacy.example.com/api"),
                ("CRON_SECRET", "s3cret"),
            ]),
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://legacy.example.com/api");
        assert_eq!(config.cron.secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_prefixed_base_url_wins_over_legacy() {
        let config = AdminConfig::load_from(
            None,
            env(&[
                ("NEXT_PUBLIC_BaseUrl", "https://legacy.example.com/api"),
                ("FARM_ADMIN__API__BASE_URL", "https://new.example.com/api"),
            ]),
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://new.example.com/api");
    }

    #[test]
    fn test_invalid_concurrency_is_rejected() {
        let result = AdminConfig::load_from(
            None,
            env(&[("FARM_ADMIN__GENERATOR__CONCURRENCY_LIMIT", "0")]),
        );
        assert!(matches!(result, Err(AdminError::Configuration(_))));
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = AdminConfig::load_from_file(Path::new("/nonexistent/farm-admin.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AdminConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed: AdminConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
