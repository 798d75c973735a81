//! Pure session transitions.

use alpha_adapters::CompletionError;
use alpha_primitives::FrameworkId;
use alpha_prompts::{RequestPayload, compose};
use tracing::debug;

use crate::state::{SessionState, Status};

/// Inputs that drive the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Replace the raw input text.
    EditText(String),
    /// Choose a framework; never starts generation by itself.
    SelectFramework(FrameworkId),
    /// Start a generation if the guard passes.
    Generate,
    /// Re-run the failed generation with the inputs currently held.
    Retry,
    /// Clear the outcome and the selection, keeping the raw input.
    Reset,
    /// The in-flight remote call finished.
    Completed(Result<String, CompletionError>),
}

/// Work the driver must perform after a transition.
#[derive(Debug, PartialEq)]
pub enum Effect {
    /// Send the payload to the completion client exactly once and feed the
    /// outcome back as [`SessionEvent::Completed`].
    Complete(RequestPayload),
}

/// Result of applying one event.
#[derive(Debug, PartialEq)]
pub struct Transition {
    /// State after the event.
    pub state: SessionState,
    /// Follow-up work, if any.
    pub effect: Option<Effect>,
}

impl Transition {
    fn unchanged(state: &SessionState) -> Self {
        Self {
            state: state.clone(),
            effect: None,
        }
    }

    fn to(state: SessionState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

/// Applies `event` to `state`.
///
/// Events that are not meaningful in the current phase leave the state
/// untouched and produce no effect: a second `Generate` while a request is
/// in flight, a `Retry` outside `Failed`, a stale `Completed`, or a
/// `Generate` whose guard fails.
#[must_use]
pub fn reduce(state: &SessionState, event: SessionEvent) -> Transition {
    let generating = state.phase().is_generating();

    match event {
        SessionEvent::EditText(text) if !generating => Transition::to(SessionState {
            raw_input: text,
            ..state.clone()
        }),
        SessionEvent::SelectFramework(id) if !generating => Transition::to(SessionState {
            selected: Some(id),
            ..state.clone()
        }),
        SessionEvent::Generate => start_generation(state),
        SessionEvent::Retry if matches!(state.status, Status::Failed(_)) => start_generation(state),
        SessionEvent::Reset if matches!(state.status, Status::Succeeded(_) | Status::Failed(_)) => {
            Transition::to(SessionState {
                selected: None,
                status: Status::Idle,
                ..state.clone()
            })
        }
        SessionEvent::Completed(outcome) if generating => {
            let status = match outcome {
                Ok(text) => Status::Succeeded(text),
                Err(err) => Status::Failed(err.user_message().to_owned()),
            };
            Transition::to(SessionState {
                status,
                ..state.clone()
            })
        }
        ignored => {
            debug!(event = ?ignored, phase = ?state.phase(), "event ignored in current phase");
            Transition::unchanged(state)
        }
    }
}

fn start_generation(state: &SessionState) -> Transition {
    if !state.can_generate() {
        debug!(
            phase = ?state.phase(),
            has_input = !state.raw_input.trim().is_empty(),
            has_framework = state.selected.is_some(),
            "generate guard not met"
        );
        return Transition::unchanged(state);
    }

    let Some(template) = state.selected_template() else {
        return Transition::unchanged(state);
    };
    let payload = match compose(&state.raw_input, template) {
        Ok(payload) => payload,
        Err(err) => {
            debug!(error = %err, "request composition rejected input");
            return Transition::unchanged(state);
        }
    };

    Transition {
        state: SessionState {
            status: Status::Generating,
            attempts: state.attempts + 1,
            ..state.clone()
        },
        effect: Some(Effect::Complete(payload)),
    }
}
