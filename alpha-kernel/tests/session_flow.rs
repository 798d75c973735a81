use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alpha_adapters::CompletionClient;
use alpha_adapters::traits::{
    AdapterError, AdapterMetadata, AdapterResult, AdapterStream, InferenceChunk, InferenceRequest,
    ModelAdapter,
};
use alpha_kernel::{Effect, Phase, SessionController, SessionEvent};
use alpha_primitives::FrameworkId;
use async_trait::async_trait;
use futures::stream;
use tokio::sync::Notify;

const MARKDOWN: &str = "### Framework Breakdown\n**Role:** Marketer\n**Task:** Ad\n**Format:** Post\n### Optimized Prompt\n```text\nAct as a marketer.\n```";

/// Replies from a script, one entry per call; `None` simulates a transport
/// fault.
struct ScriptedAdapter {
    metadata: AdapterMetadata,
    script: Mutex<VecDeque<Option<&'static str>>>,
    requests: Mutex<Vec<InferenceRequest>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl ScriptedAdapter {
    fn new(script: impl IntoIterator<Item = Option<&'static str>>) -> Self {
        Self {
            metadata: AdapterMetadata::new("test", "scripted"),
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelAdapter for ScriptedAdapter {
    fn metadata(&self) -> &AdapterMetadata {
        &self.metadata
    }

    async fn infer(&self, request: InferenceRequest) -> AdapterResult<AdapterStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let next = self.script.lock().unwrap().pop_front().flatten();
        match next {
            Some(text) => {
                let chunk = InferenceChunk::new(text, true);
                Ok(Box::pin(stream::once(async move { Ok(chunk) })))
            }
            None => Err(AdapterError::transport("connection reset by peer")),
        }
    }
}

fn controller(adapter: &Arc<ScriptedAdapter>) -> SessionController {
    SessionController::new(CompletionClient::new(adapter.clone()))
}

fn ready(controller: &mut SessionController) {
    controller.edit_text("I need a facebook ad for running shoes");
    controller.select_framework(FrameworkId::Rtf);
}

#[tokio::test]
async fn rtf_request_succeeds_with_exact_text() {
    let adapter = Arc::new(ScriptedAdapter::new([Some(MARKDOWN)]));
    let mut controller = controller(&adapter);
    ready(&mut controller);

    assert_eq!(controller.generate().await, Phase::Succeeded);
    assert_eq!(controller.state().result_text(), Some(MARKDOWN));
    assert!(controller.state().error_message().is_none());
    assert_eq!(adapter.calls(), 1);

    let requests = adapter.requests.lock().unwrap();
    let instruction = requests[0].system_prompt().unwrap();
    let role = instruction.find("Role").unwrap();
    let task = instruction.find("Task").unwrap();
    let format = instruction.find("Format").unwrap();
    assert!(role < task && task < format);
    assert_eq!(requests[0].prompt(), "I need a facebook ad for running shoes");
    assert_eq!(requests[0].temperature(), Some(0.7));
}

#[tokio::test]
async fn missing_credential_never_reaches_an_adapter() {
    let mut controller = SessionController::new(CompletionClient::without_credential());
    ready(&mut controller);

    assert_eq!(controller.generate().await, Phase::Failed);
    assert_eq!(controller.state().error_message(), Some("API Key is missing."));
}

#[tokio::test]
async fn transport_fault_then_retry_issues_one_new_call() {
    let adapter = Arc::new(ScriptedAdapter::new([None, Some(MARKDOWN)]));
    let mut controller = controller(&adapter);
    ready(&mut controller);

    assert_eq!(controller.generate().await, Phase::Failed);
    assert_eq!(
        controller.state().error_message(),
        Some("Failed to connect to the neural core. Please check your connection or API key.")
    );
    assert_eq!(adapter.calls(), 1);

    assert_eq!(controller.retry().await, Phase::Succeeded);
    assert_eq!(adapter.calls(), 2);
    assert_eq!(controller.state().result_text(), Some(MARKDOWN));

    let requests = adapter.requests.lock().unwrap();
    assert_eq!(requests[0], requests[1]);
}

#[tokio::test]
async fn second_trigger_while_generating_is_noop() {
    let adapter = Arc::new(ScriptedAdapter::new([Some(MARKDOWN), Some("unused")]));
    let mut controller = controller(&adapter);
    ready(&mut controller);

    let effect = controller.dispatch(SessionEvent::Generate).expect("guard passes");
    assert_eq!(controller.state().phase(), Phase::Generating);
    assert!(controller.dispatch(SessionEvent::Generate).is_none());
    assert!(controller.dispatch(SessionEvent::Retry).is_none());

    assert_eq!(controller.execute(effect).await, Phase::Succeeded);
    assert_eq!(adapter.calls(), 1);
    assert_eq!(controller.state().attempts(), 1);
}

#[tokio::test]
async fn reset_after_success_keeps_raw_input() {
    let adapter = Arc::new(ScriptedAdapter::new([Some(MARKDOWN)]));
    let mut controller = controller(&adapter);
    ready(&mut controller);
    controller.generate().await;

    controller.reset();
    let state = controller.state();
    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.result_text().is_none());
    assert!(state.error_message().is_none());
    assert!(state.selected().is_none());
    assert_eq!(state.raw_input(), "I need a facebook ad for running shoes");

    // Selection was cleared, so generating again is gated.
    assert_eq!(controller.generate().await, Phase::Idle);
    assert_eq!(adapter.calls(), 1);
}

#[tokio::test]
async fn subscribers_observe_generating_before_result() {
    let gate = Arc::new(Notify::new());
    let adapter = Arc::new(ScriptedAdapter::new([Some(MARKDOWN)]).gated(Arc::clone(&gate)));
    let mut controller = controller(&adapter);
    ready(&mut controller);

    let mut rx = controller.subscribe();
    let observer = async {
        rx.wait_for(|state| state.phase() == Phase::Generating)
            .await
            .expect("sender alive");
        gate.notify_one();
    };

    let (phase, ()) = tokio::join!(controller.generate(), observer);
    assert_eq!(phase, Phase::Succeeded);
    assert_eq!(rx.borrow().result_text(), Some(MARKDOWN));
}

#[tokio::test]
async fn effect_payload_matches_current_inputs() {
    let adapter = Arc::new(ScriptedAdapter::new([Some(MARKDOWN)]));
    let mut controller = controller(&adapter);
    controller.edit_text("plan a product launch");
    controller.select_framework(FrameworkId::Rise);

    let Some(Effect::Complete(payload)) = controller.dispatch(SessionEvent::Generate) else {
        panic!("expected effect");
    };
    assert_eq!(payload.framework(), FrameworkId::Rise);
    assert_eq!(payload.user_content(), "plan a product launch");
}

#[tokio::test]
async fn replayed_effect_does_not_call_again() {
    let adapter = Arc::new(ScriptedAdapter::new([Some(MARKDOWN), Some("second")]));
    let mut controller = controller(&adapter);
    ready(&mut controller);

    let Some(Effect::Complete(payload)) = controller.dispatch(SessionEvent::Generate) else {
        panic!("expected effect");
    };
    let replay = Effect::Complete(payload.clone());

    assert_eq!(controller.execute(Effect::Complete(payload)).await, Phase::Succeeded);
    assert_eq!(controller.execute(replay).await, Phase::Succeeded);

    assert_eq!(adapter.calls(), 1);
    assert_eq!(controller.state().attempts(), 1);
    assert_eq!(controller.state().result_text(), Some(MARKDOWN));
}
