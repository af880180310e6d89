//! Configuration management for csb.
//!
//! Parses `csb.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [embed]
//! directory = "examples"
//! protocol = "embedded-codesandbox://"
//! iframe_template = '<iframe src="{url}" loading="lazy"></iframe>'
//!
//! [embed.options]
//! view = "preview"
//! hidenavigation = 1
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `embed.directory`, `embed.protocol` and `embed.iframe_template` support
//! `${VAR}` and `${VAR:-default}`. `embed.directory` also expands a leading `~`.

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the examples root directory.
    pub directory: Option<PathBuf>,
    /// Override the sentinel protocol.
    pub protocol: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "csb.toml";

/// Default sentinel protocol.
const DEFAULT_PROTOCOL: &str = "embedded-codesandbox://";

/// Placeholder the iframe template must contain.
const URL_PLACEHOLDER: &str = "{url}";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Embedding configuration as parsed from TOML.
    embed: EmbedConfigRaw,

    /// Resolved embedding configuration (set after loading).
    #[serde(skip)]
    pub embed_resolved: EmbedSettings,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw `[embed]` section as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct EmbedConfigRaw {
    directory: Option<String>,
    protocol: Option<String>,
    iframe_template: Option<String>,
    options: Option<BTreeMap<String, toml::Value>>,
}

/// Resolved embedding configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedSettings {
    /// Examples root directory, resolved against the config file location.
    pub directory: Option<PathBuf>,
    /// Sentinel protocol prefix.
    pub protocol: String,
    /// Custom iframe template containing `{url}`.
    pub iframe_template: Option<String>,
    /// Default embed options. `None` keeps the built-in defaults.
    pub options: Option<BTreeMap<String, String>>,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            directory: None,
            protocol: DEFAULT_PROTOCOL.to_owned(),
            iframe_template: None,
            options: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`embed.directory`").
        field: String,
        /// Error message (e.g., "${`EXAMPLES_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `csb.toml` in current directory and parents.
    /// Without a file the defaults are used.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(directory) = &settings.directory {
            self.embed_resolved.directory = Some(directory.clone());
        }
        if let Some(protocol) = &settings.protocol {
            self.embed_resolved.protocol.clone_from(protocol);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Expand environment variables and resolve paths against `config_dir`.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let raw = &self.embed;

        let directory = raw
            .directory
            .as_deref()
            .map(|dir| expand::expand_path(dir, "embed.directory"))
            .transpose()?
            .map(|dir| config_dir.join(dir));
        let protocol = match raw.protocol.as_deref() {
            Some(protocol) => expand::expand_env(protocol, "embed.protocol")?,
            None => DEFAULT_PROTOCOL.to_owned(),
        };
        let iframe_template = raw
            .iframe_template
            .as_deref()
            .map(|t| expand::expand_env(t, "embed.iframe_template"))
            .transpose()?;
        let options = raw
            .options
            .as_ref()
            .map(|options| {
                options
                    .iter()
                    .map(|(key, value)| Ok((key.clone(), option_value(key, value)?)))
                    .collect::<Result<BTreeMap<_, _>, ConfigError>>()
            })
            .transpose()?;

        self.embed_resolved = EmbedSettings {
            directory,
            protocol,
            iframe_template,
            options,
        };
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let embed = &self.embed_resolved;

        if embed.protocol.is_empty() {
            return Err(ConfigError::Validation(
                "embed.protocol cannot be empty".to_owned(),
            ));
        }
        if let Some(template) = &embed.iframe_template
            && !template.contains(URL_PLACEHOLDER)
        {
            return Err(ConfigError::Validation(format!(
                "embed.iframe_template must contain {URL_PLACEHOLDER}"
            )));
        }
        if let Some(options) = &embed.options
            && options.keys().any(String::is_empty)
        {
            return Err(ConfigError::Validation(
                "embed.options keys cannot be empty".to_owned(),
            ));
        }

        Ok(())
    }
}

/// Convert a scalar TOML value into an embed option string.
fn option_value(key: &str, value: &toml::Value) -> Result<String, ConfigError> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        _ => Err(ConfigError::Validation(format!(
            "embed.options.{key} must be a string, number or boolean"
        ))),
    }
}
