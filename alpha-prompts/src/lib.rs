//! Request composition for Prompt Alpha.
//!
//! [`compose`] turns raw user intent plus a catalog framework into the
//! [`RequestPayload`] sent to the model; [`response`] reads the two-section
//! Markdown the model is instructed to return.

#![warn(missing_docs, clippy::pedantic)]

mod compose;
mod error;
pub mod response;
pub mod template;

pub use compose::{DEFAULT_TEMPERATURE, RequestPayload, compose};
pub use error::{PromptError, PromptResult};
pub use response::{BreakdownEntry, OptimizedResponse};
pub use template::PromptTemplate;
