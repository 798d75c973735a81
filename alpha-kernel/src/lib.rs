//! Session state machine for Prompt Alpha.
//!
//! [`reduce`] is a pure `(state, event) -> state` transition function; it
//! never performs I/O and instead returns an [`Effect`] describing the one
//! remote call to make. [`SessionController`] owns the state, runs effects
//! through a [`CompletionClient`](alpha_adapters::CompletionClient), and
//! publishes an immutable snapshot after every transition.

#![warn(missing_docs, clippy::pedantic)]

mod controller;
mod machine;
mod state;

pub use controller::SessionController;
pub use machine::{Effect, SessionEvent, Transition, reduce};
pub use state::{Phase, SessionState};
