//! Drives the state machine and runs its effects.

use alpha_adapters::CompletionClient;
use alpha_primitives::{FrameworkId, RequestId};
use tokio::sync::watch;
use tracing::{Instrument, debug, info_span};

use crate::machine::{Effect, SessionEvent, reduce};
use crate::state::{Phase, SessionState};

/// Owns the single [`SessionState`] and the completion client.
///
/// Every transition that changes the state publishes a new snapshot to
/// subscribers. Mutating methods take `&mut self`, so at most one request can
/// be in flight per controller.
#[derive(Debug)]
pub struct SessionController {
    state: SessionState,
    client: CompletionClient,
    snapshots: watch::Sender<SessionState>,
}

impl SessionController {
    /// Creates an idle controller backed by `client`.
    #[must_use]
    pub fn new(client: CompletionClient) -> Self {
        let state = SessionState::new();
        let (snapshots, _) = watch::channel(state.clone());
        Self {
            state,
            client,
            snapshots,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Subscribes to state snapshots. The receiver starts at the current
    /// state and sees every later change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.snapshots.subscribe()
    }

    /// Applies an event without running its effect.
    ///
    /// Returns the effect the caller is now responsible for executing. Used
    /// directly by drivers that schedule the remote call themselves; most
    /// callers want [`generate`](Self::generate) or [`retry`](Self::retry).
    pub fn dispatch(&mut self, event: SessionEvent) -> Option<Effect> {
        let transition = reduce(&self.state, event);
        if transition.state != self.state {
            debug!(
                from = ?self.state.phase(),
                to = ?transition.state.phase(),
                attempts = transition.state.attempts(),
                "session transition"
            );
            self.state = transition.state;
            self.snapshots.send_replace(self.state.clone());
        }
        transition.effect
    }

    /// Replaces the raw input.
    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.dispatch(SessionEvent::EditText(text.into()));
    }

    /// Selects a framework.
    pub fn select_framework(&mut self, id: FrameworkId) {
        self.dispatch(SessionEvent::SelectFramework(id));
    }

    /// Returns to idle, clearing the outcome and the selection.
    pub fn reset(&mut self) {
        self.dispatch(SessionEvent::Reset);
    }

    /// Generates with the current inputs. Returns the resulting phase; when
    /// the guard fails nothing happens and the current phase is returned.
    pub async fn generate(&mut self) -> Phase {
        self.run(SessionEvent::Generate).await
    }

    /// Retries after a failure with the inputs currently held.
    pub async fn retry(&mut self) -> Phase {
        self.run(SessionEvent::Retry).await
    }

    /// Executes an effect previously returned by [`dispatch`](Self::dispatch)
    /// and applies its outcome.
    ///
    /// The client is only called while the session is `Generating`; an effect
    /// replayed after its request settled is dropped without a remote call.
    pub async fn execute(&mut self, effect: Effect) -> Phase {
        let Effect::Complete(payload) = effect;
        if !self.state.phase().is_generating() {
            debug!(phase = ?self.state.phase(), "effect dropped outside generation");
            return self.state.phase();
        }
        let request_id = RequestId::random();
        let span = info_span!("generation", %request_id, framework = %payload.framework());

        let outcome = self.client.complete(&payload).instrument(span).await;
        self.dispatch(SessionEvent::Completed(outcome));
        self.state.phase()
    }

    async fn run(&mut self, event: SessionEvent) -> Phase {
        match self.dispatch(event) {
            Some(effect) => self.execute(effect).await,
            None => self.state.phase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_each_change() {
        let mut controller = SessionController::new(CompletionClient::without_credential());
        let mut rx = controller.subscribe();
        assert!(!rx.has_changed().unwrap());

        controller.edit_text("hello");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().raw_input(), "hello");

        controller.select_framework(FrameworkId::Tag);
        assert_eq!(rx.borrow_and_update().selected(), Some(FrameworkId::Tag));
    }

    #[test]
    fn ignored_events_do_not_notify() {
        let mut controller = SessionController::new(CompletionClient::without_credential());
        let rx = controller.subscribe();
        controller.reset();
        assert!(controller.dispatch(SessionEvent::Retry).is_none());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn missing_credential_fails_with_message() {
        let mut controller = SessionController::new(CompletionClient::without_credential());
        controller.edit_text("I need a facebook ad for running shoes");
        controller.select_framework(FrameworkId::Rtf);

        assert_eq!(controller.generate().await, Phase::Failed);
        let message = controller.state().error_message().unwrap();
        assert!(!message.is_empty());
        assert!(controller.state().result_text().is_none());
    }

    #[tokio::test]
    async fn failed_guard_returns_current_phase() {
        let mut controller = SessionController::new(CompletionClient::without_credential());
        controller.select_framework(FrameworkId::Rtf);
        assert_eq!(controller.generate().await, Phase::Idle);
        assert_eq!(controller.state().attempts(), 0);
    }
}
