//! Prompt Alpha SDK facade.
//!
//! Bundles the workspace crates behind feature flags so embedders can pull in
//! only the catalog and composer, or the whole session runtime.

#![warn(missing_docs, clippy::pedantic)]

/// Framework catalog and shared primitives.
pub use alpha_primitives as primitives;

/// Request composition and response parsing (enabled by `prompts` feature).
#[cfg(feature = "prompts")]
pub use alpha_prompts as prompts;

/// Model adapters and the completion client (enabled by `adapters` feature).
#[cfg(feature = "adapters")]
pub use alpha_adapters as adapters;

/// Session state machine and controller (enabled by `kernel` feature).
#[cfg(feature = "kernel")]
pub use alpha_kernel as kernel;

/// Configuration loading (enabled by `config` feature).
#[cfg(feature = "config")]
pub use alpha_config as config;

/// Tracing setup (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use alpha_telemetry as telemetry;
