//! Identifier types.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;
use uuid::Uuid;

/// Correlates the log lines of one generation attempt.
///
/// A retry is a new attempt and therefore gets a fresh identifier.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a random request identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
