//! Pure state transition function

use super::lead::{extract_contact, LeadRecord, LEAD_PROMPT};
use super::{ConvContext, ConvState, Effect, Event, LeadPhase};
use crate::assistant::{augment, Resolution};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
pub fn transition(
    state: &ConvState,
    context: &ConvContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (&state.lead, event) {
        // ============================================================
        // User submissions
        // ============================================================

        // Requested + message with an email -> Captured, query never sent
        (LeadPhase::Requested, Event::UserSubmitted { text }) => match extract_contact(&text) {
            Some(contact) => {
                let record = LeadRecord::new(contact, context.lead_source());
                let acknowledgement = record.acknowledgement();
                Ok(TransitionResult::new(
                    state.with_lead(LeadPhase::Captured {
                        record: record.clone(),
                    }),
                )
                .with_effect(Effect::append_user(text))
                .with_effect(Effect::SubmitLead { record })
                .with_effect(Effect::append_lead(acknowledgement)))
            }
            None => Ok(query_assistant(state, text)),
        },

        (_, Event::UserSubmitted { text }) => Ok(query_assistant(state, text)),

        // ============================================================
        // Assistant answers
        // ============================================================
        (_, Event::AssistantResolved { .. }) if !state.pending_request => Err(
            TransitionError::InvalidTransition("assistant answer without a pending request".into()),
        ),

        (_, Event::AssistantResolved { query, resolution }) => {
            let Resolution {
                answer,
                sources,
                related,
                outcome,
                ..
            } = resolution;

            let content = if outcome.allows_augmentation() {
                augment::augment(&answer, &query)
            } else {
                answer
            };

            Ok(TransitionResult::new(state.with_pending(false))
                .with_effect(Effect::append_answer(content, sources))
                .with_effects((!related.is_empty()).then(|| Effect::replace_related(related)))
                .with_effect(Effect::EvaluateLeadTrigger))
        }

        // ============================================================
        // Lead prompt trigger
        // ============================================================
        (LeadPhase::NotRequested, Event::TurnCompleted { user_turns })
            if user_turns >= context.lead_threshold =>
        {
            Ok(TransitionResult::new(state.with_lead(LeadPhase::Requested))
                .with_effect(Effect::append_lead(LEAD_PROMPT)))
        }

        (_, Event::TurnCompleted { .. }) => Ok(TransitionResult::new(state.clone())),
    }
}

/// Append the user turn and send it to the assistant
fn query_assistant(state: &ConvState, text: String) -> TransitionResult {
    TransitionResult::new(state.with_pending(true))
        .with_effect(Effect::append_user(text.clone()))
        .with_effect(Effect::QueryAssistant { query: text })
}
