//! Session state value.

use alpha_primitives::{FrameworkId, FrameworkTemplate};

/// Phase of the single session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for input; initial phase.
    #[default]
    Idle,
    /// One remote request is in flight.
    Generating,
    /// The last request produced text.
    Succeeded,
    /// The last request failed.
    Failed,
}

impl Phase {
    /// Returns `true` while a request is in flight.
    #[must_use]
    pub const fn is_generating(self) -> bool {
        matches!(self, Self::Generating)
    }

    /// Phases from which a new generation may start.
    #[must_use]
    pub const fn accepts_generate(self) -> bool {
        !self.is_generating()
    }
}

/// Outcome carried by the terminal phases. Keeping the text inside the
/// phase makes "result and error both present" unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum Status {
    #[default]
    Idle,
    Generating,
    Succeeded(String),
    Failed(String),
}

/// Immutable snapshot of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub(crate) raw_input: String,
    pub(crate) selected: Option<FrameworkId>,
    pub(crate) status: Status,
    pub(crate) attempts: u32,
}

impl SessionState {
    /// A fresh idle session with no input and no selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw input, exactly as typed.
    #[must_use]
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Selected framework key, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<FrameworkId> {
        self.selected
    }

    /// Selected framework resolved against the catalog.
    #[must_use]
    pub fn selected_template(&self) -> Option<&'static FrameworkTemplate> {
        self.selected.map(FrameworkId::template)
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self.status {
            Status::Idle => Phase::Idle,
            Status::Generating => Phase::Generating,
            Status::Succeeded(_) => Phase::Succeeded,
            Status::Failed(_) => Phase::Failed,
        }
    }

    /// Generated Markdown; present only in [`Phase::Succeeded`].
    #[must_use]
    pub fn result_text(&self) -> Option<&str> {
        match &self.status {
            Status::Succeeded(text) => Some(text),
            _ => None,
        }
    }

    /// User-facing error; present only in [`Phase::Failed`].
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            Status::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Number of remote calls requested over the session's lifetime.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Whether a generate trigger would pass the guard right now.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        self.phase().accepts_generate()
            && self.selected.is_some()
            && !self.raw_input.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle_and_empty() {
        let state = SessionState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.raw_input(), "");
        assert!(state.selected().is_none());
        assert!(state.result_text().is_none());
        assert!(state.error_message().is_none());
        assert!(!state.can_generate());
    }

    #[test]
    fn outcome_accessors_follow_phase() {
        let mut state = SessionState::new();
        state.status = Status::Succeeded("done".into());
        assert_eq!(state.phase(), Phase::Succeeded);
        assert_eq!(state.result_text(), Some("done"));
        assert!(state.error_message().is_none());

        state.status = Status::Failed("boom".into());
        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(state.error_message(), Some("boom"));
        assert!(state.result_text().is_none());
    }

    #[test]
    fn guard_needs_text_and_selection() {
        let mut state = SessionState::new();
        state.raw_input = "   ".into();
        state.selected = Some(FrameworkId::Rtf);
        assert!(!state.can_generate());

        state.raw_input = "ad copy".into();
        assert!(state.can_generate());

        state.status = Status::Generating;
        assert!(!state.can_generate());
    }

    #[test]
    fn selected_template_resolves() {
        let mut state = SessionState::new();
        state.selected = Some(FrameworkId::Care);
        assert_eq!(state.selected_template().map(|t| t.name()), Some("C-A-R-E"));
    }
}
