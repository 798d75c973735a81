//! Configuration for Prompt Alpha.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables. The API key is resolved once here and never read
//! again for the lifetime of the process.

#![warn(missing_docs, clippy::pedantic)]

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use alpha_adapters::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Preferred environment variable for the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Fallback environment variable for the API key.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";
/// Overrides the model identifier.
pub const MODEL_ENV: &str = "PROMPT_ALPHA_MODEL";
/// Overrides the API base URL.
pub const BASE_URL_ENV: &str = "PROMPT_ALPHA_BASE_URL";

const CONFIG_DIR: &str = "prompt-alpha";
const CONFIG_FILENAME: &str = "config.toml";

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A value failed validation.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Runtime configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlphaConfig {
    /// Gemini model identifier.
    pub model: String,
    /// API root, ending in `/`.
    pub base_url: String,
    /// Transport timeout for the single remote call.
    pub timeout_secs: u64,
    /// `tracing` filter directive; `RUST_LOG` still wins when set.
    pub log_filter: Option<String>,
    /// API key. Prefer the environment over storing it in the file.
    pub api_key: Option<String>,
}

impl Default for AlphaConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: 60,
            log_filter: None,
            api_key: None,
        }
    }
}

impl fmt::Debug for AlphaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphaConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("log_filter", &self.log_filter)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AlphaConfig {
    /// Loads configuration from `path` (or the default location) and the
    /// process environment.
    ///
    /// An explicit `path` must exist; a missing default file is fine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or a
    /// value fails validation.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Overlays environment variables read through `lookup`. Blank values
    /// are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = get(API_KEY_ENV).or_else(|| get(FALLBACK_API_KEY_ENV)) {
            self.api_key = Some(key);
        }
        if let Some(model) = get(MODEL_ENV) {
            self.model = model;
        }
        if let Some(base_url) = get(BASE_URL_ENV) {
            self.base_url = base_url;
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::invalid("model", "must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("timeout_secs", "must be greater than zero"));
        }
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "base_url",
                "must start with http:// or https://",
            ));
        }
        Ok(())
    }

    /// Returns `true` when an API key was resolved.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    /// Transport timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the Gemini adapter configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the base URL is rejected by the
    /// adapter.
    pub fn gemini_config(&self) -> ConfigResult<GeminiConfig> {
        let mut config = GeminiConfig::new(self.model.trim())
            .with_timeout(self.timeout())
            .with_base_url(&self.base_url)
            .map_err(|err| ConfigError::invalid("base_url", err.to_string()))?;
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        Ok(config)
    }
}

/// `<config dir>/prompt-alpha/config.toml`, when the platform has a config
/// directory.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}
