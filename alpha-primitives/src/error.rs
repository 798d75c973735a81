//! Shared error definitions for Prompt Alpha primitives.

use thiserror::Error;

/// Errors that can occur while handling primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// The supplied token does not name a catalog framework.
    #[error("unknown framework `{id}` (expected one of: rtf, tag, bab, care, rise)")]
    UnknownFramework {
        /// The offending identifier string.
        id: String,
    },
}
