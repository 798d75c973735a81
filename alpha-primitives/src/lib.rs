//! Core shared types for Prompt Alpha.
//!
//! The framework catalog lives here because every other crate reads it: the
//! composer renders slots into the system instruction, the session kernel
//! stores a [`FrameworkId`] as its selection, and the CLI prints it.

#![warn(missing_docs, clippy::pedantic)]

mod catalog;
mod error;
mod framework;
mod ids;

/// The fixed, ordered framework catalog.
pub use catalog::{catalog, find};
/// Error raised when parsing primitive types.
pub use error::Error;
/// Framework template metadata.
pub use framework::{ColorToken, FrameworkId, FrameworkTemplate, Slot};
/// Identifier attached to each generation attempt.
pub use ids::RequestId;
