//! Optional TOML configuration for the estimator CLI.
//!
//! Every key is optional; missing keys fall back to the defaults below.
//!
//! ```toml
//! [calculator]
//! variant = "legacy"          # "current" (default) or "legacy"
//!
//! [quote]
//! currency_symbol = "€"
//! grouping_separator = "."
//! output_dir = "quotes"
//!
//! [logging]
//! level = "info"              # any EnvFilter directive
//! file = "estimator.log"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use quote_core::{Currency, Variant};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "estimator.toml";

/// Errors that can occur while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub calculator: CalculatorConfig,
    pub quote: QuoteConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    pub variant: Variant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuoteConfig {
    pub currency_symbol: String,
    pub grouping_separator: char,
    /// Directory for exported quotes given without an explicit path.
    pub output_dir: Option<PathBuf>,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        let currency = Currency::default();
        Self {
            currency_symbol: currency.symbol,
            grouping_separator: currency.grouping_separator,
            output_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

/// Values given on the command line; each one replaces its config key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub variant: Option<Variant>,
    pub currency_symbol: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Reads and parses the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `explicit` when given; otherwise [`DEFAULT_CONFIG_FILE`] in
    /// `search_dir` if it exists; otherwise the defaults.
    pub fn load_or_default(
        explicit: Option<&Path>,
        search_dir: &Path,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = search_dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn apply_overrides(
        &mut self,
        overrides: ConfigOverrides,
    ) {
        if let Some(variant) = overrides.variant {
            self.calculator.variant = variant;
        }
        if let Some(symbol) = overrides.currency_symbol {
            self.quote.currency_symbol = symbol;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(file) = overrides.log_file {
            self.logging.file = Some(file);
        }
    }

    pub fn currency(&self) -> Currency {
        Currency::new(
            self.quote.currency_symbol.clone(),
            self.quote.grouping_separator,
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.calculator.variant, Variant::Current);
        assert_eq!(config.currency(), Currency::default());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn parses_every_section() {
        let config = AppConfig::from_toml_str(
            r#"
[calculator]
variant = "legacy"

[quote]
currency_symbol = "€"
grouping_separator = "."
output_dir = "quotes"

[logging]
level = "debug"
file = "estimator.log"
"#,
        )
        .unwrap();

        assert_eq!(config.calculator.variant, Variant::Legacy);
        assert_eq!(config.currency(), Currency::new("€", '.'));
        assert_eq!(config.quote.output_dir, Some(PathBuf::from("quotes")));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("estimator.log")));
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = AppConfig::from_toml_str("[quote]\ncurrency = \"$\"\n");

        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_variant() {
        let result = AppConfig::from_toml_str("[calculator]\nvariant = \"beta\"\n");

        assert!(result.is_err());
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = AppConfig::from_toml_str("[logging]\nlevel = \"info\"\n").unwrap();

        config.apply_overrides(ConfigOverrides {
            variant: Some(Variant::Legacy),
            currency_symbol: Some("£".to_string()),
            log_level: None,
            log_file: Some(PathBuf::from("run.log")),
        });

        assert_eq!(config.calculator.variant, Variant::Legacy);
        assert_eq!(config.quote.currency_symbol, "£");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn load_or_default_prefers_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[calculator]\nvariant = \"legacy\"\n").unwrap();

        let config = AppConfig::load_or_default(Some(&path), dir.path()).unwrap();

        assert_eq!(config.calculator.variant, Variant::Legacy);
    }

    #[test]
    fn load_or_default_finds_file_in_search_dir() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[quote]\ncurrency_symbol = \"₹\"\n",
        )
        .unwrap();

        let config = AppConfig::load_or_default(None, dir.path()).unwrap();

        assert_eq!(config.quote.currency_symbol, "₹");
    }

    #[test]
    fn load_or_default_without_file_is_default() {
        let dir = tempdir().unwrap();

        let config = AppConfig::load_or_default(None, dir.path()).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn load_missing_explicit_file_errors() {
        let result = AppConfig::load(Path::new("/nonexistent/estimator.toml"));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
