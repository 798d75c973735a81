//! Tracing setup for Prompt Alpha binaries.
//!
//! Logs go to stderr so stdout carries only the generated Markdown.

#![warn(missing_docs, clippy::pedantic)]

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config sets one. Targets match
/// by prefix, so `alpha` covers the binary and every `alpha_*` crate.
pub const DEFAULT_FILTER: &str = "warn,alpha=info";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter `{directive}`: {reason}")]
    InvalidFilter {
        /// Directive that failed to parse.
        directive: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber was already installed.
    #[error("tracing subscriber already initialised: {0}")]
    AlreadyInitialised(String),
}

/// Subscriber options.
#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    /// Directive from configuration; `RUST_LOG` takes precedence.
    pub filter: Option<String>,
    /// Raise the level to `debug` for the workspace crates.
    pub verbose: bool,
}

impl TelemetryConfig {
    /// Resolves the directive: `RUST_LOG`, then the configured filter, then
    /// [`DEFAULT_FILTER`], with `verbose` appending debug directives.
    #[must_use]
    pub fn directive(&self, rust_log: Option<&str>) -> String {
        let base = rust_log
            .filter(|value| !value.trim().is_empty())
            .or(self.filter.as_deref())
            .unwrap_or(DEFAULT_FILTER);
        if self.verbose {
            format!("{base},alpha=debug")
        } else {
            base.to_owned()
        }
    }
}

/// Installs the global `fmt` subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError`] if the filter is invalid or a subscriber is
/// already installed.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = config.directive(rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive).map_err(|err| TelemetryError::InvalidFilter {
        directive: directive.clone(),
        reason: err.to_string(),
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| TelemetryError::AlreadyInitialised(err.to_string()))
}
