//! Model adapters and the completion client used by Prompt Alpha.
//!
//! [`traits`] defines the provider-neutral [`ModelAdapter`](traits::ModelAdapter)
//! seam, [`gemini`] implements it over HTTPS, and [`completion`] wraps an
//! adapter with the credential check, empty-body fallback, and error
//! collapsing the session layer relies on.

#![warn(missing_docs, clippy::pedantic)]

pub mod completion;
pub mod gemini;
pub mod traits;

mod http_client;

pub use completion::{CompletionClient, CompletionError, EMPTY_RESPONSE_FALLBACK};
