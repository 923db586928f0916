//! Assistant request dispatcher
//!
//! Turns one user submission into appended turns by running the state
//! machine to quiescence and executing each effect it emits.

use super::traits::{AssistantClient, LeadSink};
use crate::assistant::{resolve, AssistantRequest, RelatedDoc, Resolution};
use crate::conversation::{Message, MessageStore, Role};
use crate::state_machine::{transition, ConvContext, ConvState, Effect, Event, LeadPhase, LeadRecord};
use std::collections::VecDeque;
use std::time::Instant;
use tokio::sync::watch;

/// Read-side copy of a conversation, republished after every change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationView {
    pub messages: Vec<Message>,
    pub lead: LeadPhase,
    pub related: Vec<RelatedDoc>,
}

/// Single-writer owner of one conversation.
///
/// `send` assumes no other send is in progress; the
/// [`WidgetController`](super::WidgetController) enforces that.
pub struct Dispatcher<C, L>
where
    C: AssistantClient,
    L: LeadSink,
{
    context: ConvContext,
    state: ConvState,
    store: MessageStore,
    related: Vec<RelatedDoc>,
    assistant: C,
    leads: L,
    view: watch::Sender<ConversationView>,
}

impl<C, L> Dispatcher<C, L>
where
    C: AssistantClient,
    L: LeadSink,
{
    pub fn new(context: ConvContext, assistant: C, leads: L) -> Self {
        let (view, _) = watch::channel(ConversationView::default());
        Self {
            context,
            state: ConvState::default(),
            store: MessageStore::new(),
            related: Vec::new(),
            assistant,
            leads,
            view,
        }
    }

    /// Open the conversation with an assistant greeting
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.store.append(Message::assistant(greeting, vec![]));
        self.publish();
        self
    }

    /// Snapshots of this conversation that stay readable while a send is
    /// awaiting the assistant
    pub fn subscribe(&self) -> watch::Receiver<ConversationView> {
        self.view.subscribe()
    }

    pub fn messages(&self) -> &[Message] {
        self.store.all()
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn lead_phase(&self) -> &LeadPhase {
        &self.state.lead
    }

    pub fn related(&self) -> &[RelatedDoc] {
        &self.related
    }

    pub fn context(&self) -> &ConvContext {
        &self.context
    }

    /// Handle one user query. Never fails: every path ends in appended turns.
    pub async fn send(&mut self, query_text: &str) {
        let mut events = VecDeque::from([Event::UserSubmitted {
            text: query_text.to_string(),
        }]);

        // Effects may produce follow-up events; drain them in order
        while let Some(event) = events.pop_front() {
            let result = match transition(&self.state, &self.context, event) {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, "Conversation event rejected");
                    continue;
                }
            };

            if result.new_state.lead != self.state.lead {
                tracing::info!(
                    context_id = %self.context.context_id,
                    from = self.state.lead.name(),
                    to = result.new_state.lead.name(),
                    "Lead phase advanced"
                );
            }
            self.state = result.new_state;
            self.publish();

            for effect in result.effects {
                let follow_up = self.execute_effect(effect).await;
                self.publish();
                if let Some(follow_up) = follow_up {
                    events.push_back(follow_up);
                }
            }
        }
    }

    fn publish(&self) {
        self.view.send_if_modified(|view| {
            let next = ConversationView {
                messages: self.store.all().to_vec(),
                lead: self.state.lead.clone(),
                related: self.related.clone(),
            };
            if *view == next {
                return false;
            }
            *view = next;
            true
        });
    }

    async fn execute_effect(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::AppendMessage {
                role,
                kind,
                content,
                sources,
            } => {
                self.store.append(Message::new(role, kind, content, sources));
                None
            }

            Effect::QueryAssistant { query } => {
                let resolution = self.query_assistant(&query).await;
                Some(Event::AssistantResolved { query, resolution })
            }

            Effect::SubmitLead { record } => {
                self.submit_lead(&record).await;
                None
            }

            Effect::ReplaceRelated { related } => {
                self.related = related;
                None
            }

            Effect::EvaluateLeadTrigger => Some(Event::TurnCompleted {
                user_turns: self.store.count_by_role(Role::User),
            }),
        }
    }

    /// Exactly one request per call, never retried
    async fn query_assistant(&self, query: &str) -> Resolution {
        let request = AssistantRequest::new(query, &self.context.context_id);
        let start = Instant::now();
        let result = self.assistant.query(&request).await;
        let duration = start.elapsed();

        let status = result.as_ref().ok().map(|r| r.status);
        let resolution = resolve(query, result);

        match &resolution.diagnostic {
            None => tracing::info!(
                context_id = %self.context.context_id,
                duration_ms = %duration.as_millis(),
                sources = resolution.sources.len(),
                "Assistant answered"
            ),
            Some(diagnostic) => tracing::warn!(
                context_id = %self.context.context_id,
                duration_ms = %duration.as_millis(),
                status = ?status,
                outcome = ?resolution.outcome,
                kind = diagnostic.kind.as_str(),
                error = %diagnostic,
                "Assistant response degraded"
            ),
        }

        resolution
    }

    /// Best effort: failures are logged, never shown and never retried
    async fn submit_lead(&self, record: &LeadRecord) {
        match self.leads.submit(record).await {
            Ok(()) => tracing::info!(source = %record.source(), "Lead submitted"),
            Err(e) => tracing::warn!(
                source = %record.source(),
                error = %e,
                "Lead submission failed"
            ),
        }
    }
}
