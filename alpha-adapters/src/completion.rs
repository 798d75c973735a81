//! Remote completion client: one call per payload, failures collapsed.

use std::fmt;
use std::sync::Arc;

use alpha_prompts::RequestPayload;
use futures::StreamExt;
use thiserror::Error;
use tracing::{info, warn};

use crate::gemini::{GeminiAdapter, GeminiConfig};
use crate::traits::{AdapterResult, InferenceRequest, ModelAdapter};

/// Returned in place of an empty model response.
pub const EMPTY_RESPONSE_FALLBACK: &str = "Failed to generate prompt. Please try again.";

/// Failure categories surfaced to the session layer.
///
/// The underlying cause of a remote failure is logged, never exposed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CompletionError {
    /// No API key was configured at startup.
    #[error("API Key is missing.")]
    MissingCredential,

    /// Network, protocol, or provider-side fault of any kind.
    #[error("Failed to connect to the neural core. Please check your connection or API key.")]
    TransportOrServiceFailure,
}

impl CompletionError {
    /// Human-readable message shown to the user.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::MissingCredential => "API Key is missing.",
            Self::TransportOrServiceFailure => {
                "Failed to connect to the neural core. Please check your connection or API key."
            }
        }
    }
}

/// Sends composed payloads to a [`ModelAdapter`].
///
/// A client built without a credential holds no adapter at all, so
/// [`complete`](Self::complete) fails before any I/O can happen.
#[derive(Clone)]
pub struct CompletionClient {
    adapter: Option<Arc<dyn ModelAdapter>>,
}

impl fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("CompletionClient");
        if let Some(adapter) = &self.adapter {
            let metadata = adapter.metadata();
            s.field("provider", &metadata.provider())
                .field("model", &metadata.model());
        } else {
            s.field("credential", &"missing");
        }
        s.finish()
    }
}

impl CompletionClient {
    /// Wraps an already-authenticated adapter.
    #[must_use]
    pub fn new(adapter: Arc<dyn ModelAdapter>) -> Self {
        Self {
            adapter: Some(adapter),
        }
    }

    /// A client that fails every call with
    /// [`CompletionError::MissingCredential`].
    #[must_use]
    pub const fn without_credential() -> Self {
        Self { adapter: None }
    }

    /// Builds a Gemini-backed client, or a credential-less one when the
    /// configuration carries no API key.
    ///
    /// # Errors
    ///
    /// Propagates adapter construction failures.
    pub fn gemini(config: GeminiConfig) -> AdapterResult<Self> {
        if !config.has_api_key() {
            warn!("no Gemini API key configured; generation will fail until one is set");
            return Ok(Self::without_credential());
        }
        Ok(Self::new(Arc::new(GeminiAdapter::new(config)?)))
    }

    /// Returns `true` when a credential (and therefore an adapter) is present.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.adapter.is_some()
    }

    /// Performs exactly one remote call for `payload`.
    ///
    /// An empty response is not an error: [`EMPTY_RESPONSE_FALLBACK`] is
    /// returned instead. Any non-empty body, whitespace included, is returned
    /// verbatim. Nothing is retried.
    ///
    /// # Errors
    ///
    /// [`CompletionError::MissingCredential`] without touching the network
    /// when no credential is configured, otherwise
    /// [`CompletionError::TransportOrServiceFailure`] for any adapter error.
    pub async fn complete(&self, payload: &RequestPayload) -> Result<String, CompletionError> {
        let Some(adapter) = &self.adapter else {
            return Err(CompletionError::MissingCredential);
        };

        let metadata = adapter.metadata();
        info!(
            provider = metadata.provider(),
            model = metadata.model(),
            framework = %payload.framework(),
            "requesting completion"
        );

        match Self::collect(adapter.as_ref(), payload).await {
            Ok(text) if text.is_empty() => {
                warn!("model returned an empty body; substituting fallback text");
                Ok(EMPTY_RESPONSE_FALLBACK.to_owned())
            }
            Ok(text) => Ok(text),
            Err(err) => {
                warn!(error = %err, "completion failed");
                Err(CompletionError::TransportOrServiceFailure)
            }
        }
    }

    async fn collect(adapter: &dyn ModelAdapter, payload: &RequestPayload) -> AdapterResult<String> {
        let request = InferenceRequest::try_from(payload)?;
        let mut stream = adapter.infer(request).await?;
        let mut text = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            text.push_str(&chunk.delta);
            if chunk.done {
                break;
            }
        }
        Ok(text)
    }
}
