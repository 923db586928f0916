//! Mock implementations for testing
//!
//! These mocks enable end-to-end conversation tests without real I/O.

use super::traits::{AssistantClient, LeadSink};
use crate::assistant::{AssistantError, AssistantRequest, RawResponse};
use crate::state_machine::LeadRecord;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ============================================================================
// Mock Assistant Client
// ============================================================================

/// Mock assistant endpoint that returns queued responses
pub struct MockAssistantClient {
    responses: Mutex<VecDeque<Result<RawResponse, AssistantError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<AssistantRequest>>,
    /// When set, every query waits for a notification before answering
    gate: Option<Arc<Notify>>,
}

impl MockAssistantClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Queue a raw response
    pub fn queue_response(&self, response: RawResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a JSON response with the given status
    pub fn queue_json(&self, status: u16, body: &Value) {
        self.queue_response(RawResponse::json(status, body));
    }

    /// Queue a transport failure
    pub fn queue_error(&self, error: AssistantError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<AssistantRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockAssistantClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssistantClient for MockAssistantClient {
    async fn query(&self, request: &AssistantRequest) -> Result<RawResponse, AssistantError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AssistantError::transport("No mock response queued")))
    }
}

// ============================================================================
// Mock Lead Sink
// ============================================================================

/// Mock lead collector that records submissions
pub struct MockLeadSink {
    records: Mutex<Vec<LeadRecord>>,
    fail: bool,
}

impl MockLeadSink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A sink that records and then reports failure
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn recorded(&self) -> Vec<LeadRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for MockLeadSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LeadSink for MockLeadSink {
    async fn submit(&self, record: &LeadRecord) -> Result<(), AssistantError> {
        self.records.lock().unwrap().push(record.clone());
        if self.fail {
            Err(AssistantError::transport("collector unreachable"))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::fallback::{capability_overview, overview_sources, Preamble};
    use crate::conversation::{MessageKind, Role};
    use crate::runtime::{Dispatcher, WidgetController, WidgetError};
    use crate::state_machine::lead::LEAD_PROMPT;
    use crate::state_machine::{ConvContext, LeadPhase};
    use serde_json::json;
    use std::time::Duration;

    type TestController = WidgetController<Arc<MockAssistantClient>, Arc<MockLeadSink>>;

    struct Harness {
        controller: TestController,
        assistant: Arc<MockAssistantClient>,
        leads: Arc<MockLeadSink>,
    }

    fn harness_with(assistant: MockAssistantClient, leads: MockLeadSink) -> Harness {
        let assistant = Arc::new(assistant);
        let leads = Arc::new(leads);
        let dispatcher = Dispatcher::new(ConvContext::new("home"), assistant.clone(), leads.clone());
        Harness {
            controller: WidgetController::new(dispatcher),
            assistant,
            leads,
        }
    }

    fn harness() -> Harness {
        harness_with(MockAssistantClient::new(), MockLeadSink::new())
    }

    fn queue_answers(assistant: &MockAssistantClient, n: usize) {
        for i in 0..n {
            assistant.queue_json(200, &json!({ "answer": format!("Answer {i}."), "sources": [] }));
        }
    }

    #[tokio::test]
    async fn test_mock_assistant_client() {
        let mock = MockAssistantClient::new();
        mock.queue_json(200, &json!({ "answer": "Hello" }));

        let request = AssistantRequest::new("hi", "home");
        let response = mock.query(&request).await.unwrap();
        assert!(response.is_success());

        // Second call should fail (no more responses)
        let result = mock.query(&request).await;
        assert!(result.is_err());
        assert_eq!(mock.recorded_requests().len(), 2);
    }

    /// Healthy backend: user turn then augmented answer
    #[tokio::test]
    async fn test_sonic_question() {
        let h = harness();
        h.assistant.queue_json(
            200,
            &json!({ "answer": "PalC offers SONiC services.", "sources": [] }),
        );

        h.controller.submit("Tell me about SONiC").await.unwrap();

        let msgs = h.controller.messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].role, Role::User);
        assert_eq!(msgs[0].content, "Tell me about SONiC");
        assert_eq!(msgs[1].role, Role::Assistant);
        assert_eq!(msgs[1].kind, MessageKind::Answer);
        assert!(msgs[1].content.starts_with("PalC offers SONiC services.\n\n💡 "));
        assert!(msgs[1].content.contains("SONiC-based solutions"));

        let requests = h.assistant.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "Tell me about SONiC");
        assert_eq!(requests[0].context_id, "home");
        assert!(requests[0].filters.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back() {
        let h = harness();
        h.assistant
            .queue_error(AssistantError::transport("Connection failed"));

        h.controller.submit("Tell me about SONiC").await.unwrap();

        let msgs = h.controller.messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[1].content, capability_overview(Preamble::None));
        assert_eq!(msgs[1].sources, Some(overview_sources()));
    }

    #[tokio::test]
    async fn test_fallback_is_repeatable() {
        let h = harness();
        for _ in 0..2 {
            h.assistant
                .queue_response(RawResponse::new(500, Some("text/html"), "{}"));
        }

        h.controller.submit("What is EVPN?").await.unwrap();
        h.controller.submit("What is EVPN?").await.unwrap();

        let msgs = h.controller.messages();
        assert_eq!(msgs[1].content, msgs[3].content);
        assert_eq!(msgs[1].sources, Some(vec![]));
        assert_eq!(msgs[3].sources, Some(vec![]));
    }

    #[tokio::test]
    async fn test_lead_prompt_after_fourth_message() {
        let h = harness();
        queue_answers(&h.assistant, 5);

        for q in ["one", "two", "three"] {
            h.controller.submit(q).await.unwrap();
        }
        assert_eq!(h.controller.lead_phase(), LeadPhase::NotRequested);
        assert!(!h.controller.messages().iter().any(|m| m.is_lead()));

        h.controller.submit("four").await.unwrap();
        let msgs = h.controller.messages();
        let last = msgs.last().unwrap();
        assert_eq!(last.kind, MessageKind::Lead);
        assert_eq!(last.content, LEAD_PROMPT);
        assert_eq!(h.controller.lead_phase(), LeadPhase::Requested);
        // The prompt comes straight from the widget, not the assistant
        assert_eq!(h.assistant.recorded_requests().len(), 4);

        // No email: answered normally, no second prompt
        h.controller.submit("maybe later").await.unwrap();
        let msgs = h.controller.messages();
        assert_eq!(msgs.iter().filter(|m| m.is_lead()).count(), 1);
        assert_eq!(h.assistant.recorded_requests().len(), 5);
        assert_eq!(h.controller.lead_phase(), LeadPhase::Requested);
    }

    #[tokio::test]
    async fn test_lead_prompt_follows_fallback_turns() {
        // Nothing queued: every query hits a transport failure
        let h = harness();
        for q in ["a", "b", "c", "d"] {
            h.controller.submit(q).await.unwrap();
        }
        let msgs = h.controller.messages();
        assert_eq!(msgs.len(), 9);
        assert!(msgs[8].is_lead());
    }

    #[tokio::test]
    async fn test_capture_short_circuits_query() {
        let h = harness();
        queue_answers(&h.assistant, 5);
        for q in ["one", "two", "three", "four"] {
            h.controller.submit(q).await.unwrap();
        }
        let before = h.controller.messages().len();

        h.controller
            .submit("hello@company.com please call me 555-123-4567")
            .await
            .unwrap();

        assert_eq!(h.assistant.recorded_requests().len(), 4);
        let leads = h.leads.recorded();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].email(), "hello@company.com");
        assert_eq!(leads[0].phone(), Some("555-123-4567"));
        assert_eq!(leads[0].source(), "rag:home");

        let msgs = h.controller.messages();
        assert_eq!(msgs.len(), before + 2);
        assert_eq!(msgs[before].role, Role::User);
        assert!(msgs[before + 1].is_lead());
        assert!(msgs[before + 1].content.contains("hello@company.com"));
        assert!(h.controller.lead_phase().is_captured());

        // Captured is terminal: emails are now just questions
        h.controller.submit("also cc ops@company.com").await.unwrap();
        assert_eq!(h.assistant.recorded_requests().len(), 5);
        assert_eq!(h.leads.recorded().len(), 1);
        assert_eq!(
            h.controller.messages().iter().filter(|m| m.is_lead()).count(),
            2
        );
    }

    #[tokio::test]
    async fn test_lead_sink_failure_is_swallowed() {
        let h = harness_with(MockAssistantClient::new(), MockLeadSink::failing());
        queue_answers(&h.assistant, 4);
        for q in ["one", "two", "three", "four"] {
            h.controller.submit(q).await.unwrap();
        }

        h.controller.submit("me@corp.dev").await.unwrap();

        assert_eq!(h.leads.recorded().len(), 1);
        assert!(h.controller.lead_phase().is_captured());
        assert!(h.controller.messages().last().unwrap().is_lead());
    }

    #[tokio::test]
    async fn test_related_sidebar_replaced_only_by_non_empty_list() {
        let h = harness();
        h.assistant.queue_json(
            200,
            &json!({
                "answer": "a",
                "related": [{ "title": "EVPN primer", "href": "/blog/evpn", "excerpt": "", "relevance": 0.9 }]
            }),
        );
        h.assistant
            .queue_json(200, &json!({ "answer": "b", "related": [] }));

        h.controller.submit("first").await.unwrap();
        assert_eq!(h.controller.related().len(), 1);

        h.controller.submit("second").await.unwrap();
        let related = h.controller.related();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].title, "EVPN primer");
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected() {
        let h = harness();
        assert_eq!(h.controller.submit("   \n").await, Err(WidgetError::EmptyInput));
        assert!(h.controller.messages().is_empty());
        assert!(h.assistant.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_rejected_while_busy() {
        let gate = Arc::new(Notify::new());
        let h = harness_with(
            MockAssistantClient::new().with_gate(gate.clone()),
            MockLeadSink::new(),
        );
        h.assistant.queue_json(200, &json!({ "answer": "ok" }));

        let first = h.controller.submit("first");
        tokio::pin!(first);

        // Drive the first submission until it parks on the gate
        let parked = tokio::time::timeout(Duration::from_millis(20), &mut first).await;
        assert!(parked.is_err());
        assert!(h.controller.is_busy());

        assert_eq!(h.controller.submit("second").await, Err(WidgetError::Busy));

        gate.notify_one();
        assert_eq!(first.await, Ok(()));
        assert!(!h.controller.is_busy());
        assert_eq!(h.assistant.recorded_requests().len(), 1);
        assert_eq!(h.controller.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_user_turn_visible_while_answer_in_flight() {
        let gate = Arc::new(Notify::new());
        let h = harness_with(
            MockAssistantClient::new().with_gate(gate.clone()),
            MockLeadSink::new(),
        );
        h.assistant.queue_json(200, &json!({ "answer": "Here you go." }));
        let mut updates = h.controller.subscribe();

        let pending = h.controller.submit("What is EVPN?");
        tokio::pin!(pending);
        let parked = tokio::time::timeout(Duration::from_millis(20), &mut pending).await;
        assert!(parked.is_err());
        assert!(h.controller.is_busy());

        let msgs = h.controller.messages();
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].role, Role::User);
        assert_eq!(msgs[0].content, "What is EVPN?");
        assert_eq!(h.controller.lead_phase(), LeadPhase::NotRequested);
        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().messages.len(), 1);

        gate.notify_one();
        assert_eq!(pending.await, Ok(()));
        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().messages.len(), 2);
        assert!(h.controller.messages()[1].content.starts_with("Here you go."));
    }

    #[tokio::test]
    async fn test_busy_flag_clears_when_dispatch_is_dropped() {
        let gate = Arc::new(Notify::new());
        let h = harness_with(
            MockAssistantClient::new().with_gate(gate),
            MockLeadSink::new(),
        );

        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), h.controller.submit("stuck")).await;
        assert!(timed_out.is_err());
        assert!(!h.controller.is_busy());
    }
}
