use thiserror::Error;

/// Result alias for prompt operations.
pub type PromptResult<T> = Result<T, PromptError>;

/// Errors raised while composing prompts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    /// Raw input was empty or whitespace only.
    #[error("raw input is empty")]
    EmptyInput,

    /// A template placeholder had no value at render time.
    #[error("missing required variable: {name}")]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
    },
}
