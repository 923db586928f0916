//! Effects produced by state transitions

use super::LeadRecord;
use crate::assistant::RelatedDoc;
use crate::conversation::{MessageKind, Role, Source};

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a turn to the message store
    AppendMessage {
        role: Role,
        kind: MessageKind,
        content: String,
        sources: Option<Vec<Source>>,
    },

    /// Ask the assistant endpoint
    QueryAssistant { query: String },

    /// Hand a captured lead to the collector
    SubmitLead { record: LeadRecord },

    /// Swap the sidebar's related documents
    ReplaceRelated { related: Vec<RelatedDoc> },

    /// Report the user turn count back as `TurnCompleted`
    EvaluateLeadTrigger,
}

impl Effect {
    pub fn append_user(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            role: Role::User,
            kind: MessageKind::Answer,
            content: text.into(),
            sources: None,
        }
    }

    pub fn append_answer(content: impl Into<String>, sources: Vec<Source>) -> Self {
        Effect::AppendMessage {
            role: Role::Assistant,
            kind: MessageKind::Answer,
            content: content.into(),
            sources: Some(sources),
        }
    }

    pub fn append_lead(content: impl Into<String>) -> Self {
        Effect::AppendMessage {
            role: Role::Assistant,
            kind: MessageKind::Lead,
            content: content.into(),
            sources: None,
        }
    }

    pub fn replace_related(related: Vec<RelatedDoc>) -> Self {
        Effect::ReplaceRelated { related }
    }
}
