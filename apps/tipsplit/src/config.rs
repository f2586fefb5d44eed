//! Layered application configuration.
//!
//! Sources, lowest to highest priority: built-in defaults, the YAML file given
//! with `--config`, then `TIPSPLIT__*` environment variables (`__` separates
//! nesting levels). Command-line flags are applied by the caller afterwards.

use std::path::Path;

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use tip_split::{ApiKey, BillForm, SuggestionConfig};
use tracing::level_filters::LevelFilter;

/// Prefix of environment overrides, e.g. `TIPSPLIT__SUGGESTION__MODEL`.
pub const ENV_PREFIX: &str = "TIPSPLIT__";

/// Variables consulted, in order, when no API key is configured.
pub const API_KEY_FALLBACK_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub suggestion: SuggestionConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`, `off`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Values a fresh or cleared form starts with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub tip_percentage: f64,
    pub party_size: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            tip_percentage: tip_split::domain::form::DEFAULT_TIP_PERCENTAGE,
            party_size: tip_split::domain::form::DEFAULT_PARTY_SIZE,
        }
    }
}

impl DefaultsConfig {
    #[must_use]
    pub fn to_form(&self) -> BillForm {
        BillForm::with_defaults(self.tip_percentage, self.party_size)
    }
}

impl AppConfig {
    /// Load configuration from all layers and validate it.
    ///
    /// # Errors
    /// Fails when the file is missing or unparsable, a value has the wrong
    /// type, an unknown key is present, or validation rejects a value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut config: Self = figment
            .extract()
            .context("failed to load configuration")?;
        config.apply_api_key_fallback(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn apply_api_key_fallback(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self
            .suggestion
            .api_key
            .as_ref()
            .is_some_and(|key| !key.is_blank())
        {
            return;
        }
        self.suggestion.api_key = API_KEY_FALLBACK_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .map(ApiKey::new)
            .find(|key| !key.is_blank());
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    /// Returns the first offending key and why it was rejected.
    pub fn validate(&self) -> Result<()> {
        self.logging
            .level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow::anyhow!("logging.level: unknown level '{}'", self.logging.level))?;

        let tip = self.defaults.tip_percentage;
        if !tip.is_finite() || tip < 0.0 {
            bail!("defaults.tip_percentage: must be a non-negative number, got {tip}");
        }
        if self.defaults.party_size == 0 {
            bail!("defaults.party_size: must be at least 1");
        }

        let suggestion = &self.suggestion;
        if suggestion.base_url.trim().is_empty() {
            bail!("suggestion.base_url: must not be empty");
        }
        if suggestion.model.trim().is_empty() {
            bail!("suggestion.model: must not be empty");
        }
        if suggestion.request_timeout_ms == 0 {
            bail!("suggestion.request_timeout_ms: must be greater than 0");
        }
        if suggestion.max_response_bytes == 0 {
            bail!("suggestion.max_response_bytes: must be greater than 0");
        }
        Ok(())
    }

    /// Effective configuration as YAML. The API key is printed redacted.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self).context("failed to render configuration as YAML")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use super::*;
    use std::io::Write;

    const CLEAN_ENV: [(&str, Option<&str>); 5] = [
        ("GEMINI_API_KEY", None),
        ("GOOGLE_API_KEY", None),
        ("TIPSPLIT__SUGGESTION__API_KEY", None),
        ("TIPSPLIT__SUGGESTION__MODEL", None),
        ("TIPSPLIT__DEFAULTS__PARTY_SIZE", None),
    ];

    fn write_yaml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file() {
        temp_env::with_vars(CLEAN_ENV, || {
            let config = AppConfig::load(None).unwrap();
            assert_eq!(config.logging.level, "info");
            assert_eq!(config.logging.format, LogFormat::Text);
            assert_eq!(config.defaults.tip_percentage, 15.0);
            assert_eq!(config.defaults.party_size, 1);
            assert_eq!(config.suggestion.model, tip_split::config::DEFAULT_MODEL);
            assert!(config.suggestion.api_key.is_none());
        });
    }

    #[test]
    fn file_then_env_layering() {
        let file = write_yaml(
            "logging:\n  format: json\nsuggestion:\n  model: from-file\ndefaults:\n  tip_percentage: 18\n  party_size: 2\n",
        );

        temp_env::with_vars(
            [
                ("GEMINI_API_KEY", None),
                ("GOOGLE_API_KEY", None),
                ("TIPSPLIT__SUGGESTION__API_KEY", None),
                ("TIPSPLIT__SUGGESTION__MODEL", Some("from-env")),
                ("TIPSPLIT__DEFAULTS__PARTY_SIZE", None),
            ],
            || {
                let config = AppConfig::load(Some(file.path())).unwrap();
                assert_eq!(config.logging.format, LogFormat::Json);
                assert_eq!(config.suggestion.model, "from-env");
                assert_eq!(config.defaults.tip_percentage, 18.0);
                assert_eq!(config.defaults.party_size, 2);
            },
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("absent.yaml"))).unwrap_err();
        assert!(err.to_string().contains("config file does not exist"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let file = write_yaml("suggestion:\n  modle: typo\n");
        temp_env::with_vars(CLEAN_ENV, || {
            assert!(AppConfig::load(Some(file.path())).is_err());
        });
    }

    #[test]
    fn invalid_values_are_rejected() {
        let file = write_yaml("defaults:\n  party_size: 0\n");
        temp_env::with_vars(CLEAN_ENV, || {
            let err = AppConfig::load(Some(file.path())).unwrap_err();
            assert!(err.to_string().contains("defaults.party_size"));
        });

        let mut config = AppConfig::default();
        config.logging.level = "loud".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn api_key_falls_back_to_well_known_vars() {
        let mut config = AppConfig::default();
        config.apply_api_key_fallback(|name| match name {
            "GEMINI_API_KEY" => Some("  ".to_owned()),
            "GOOGLE_API_KEY" => Some("google-key".to_owned()),
            _ => None,
        });
        assert_eq!(
            config.suggestion.api_key.as_ref().map(ApiKey::expose),
            Some("google-key")
        );

        config.suggestion.api_key = Some(ApiKey::new("configured"));
        config.apply_api_key_fallback(|_| Some("ignored".to_owned()));
        assert_eq!(
            config.suggestion.api_key.as_ref().map(ApiKey::expose),
            Some("configured")
        );
    }

    #[test]
    fn yaml_dump_redacts_api_key() {
        let mut config = AppConfig::default();
        config.suggestion.api_key = Some(ApiKey::new("super-secret"));
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("[REDACTED]"));
        assert!(!yaml.contains("super-secret"));
        assert!(yaml.contains("gemini-2.0-flash"));
    }
}
