//! Conversation state types

use super::lead::{LeadRecord, LEAD_PROMPT_THRESHOLD};
use serde::Serialize;

/// Progress of the lead-capture exchange.
///
/// Only ever moves forward: `NotRequested` → `Requested` → `Captured`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LeadPhase {
    /// Nobody has asked for contact details yet
    #[default]
    NotRequested,

    /// The lead prompt was shown; the next user message is checked for an email
    Requested,

    /// Contact captured (terminal for the session)
    Captured { record: LeadRecord },
}

impl LeadPhase {
    /// Position in the forward-only ordering
    pub fn rank(&self) -> u8 {
        match self {
            LeadPhase::NotRequested => 0,
            LeadPhase::Requested => 1,
            LeadPhase::Captured { .. } => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LeadPhase::NotRequested => "not_requested",
            LeadPhase::Requested => "requested",
            LeadPhase::Captured { .. } => "captured",
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self, LeadPhase::Captured { .. })
    }
}

/// Per-session conversation state, derived and never persisted
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ConvState {
    pub lead: LeadPhase,
    /// An assistant request is outstanding
    pub pending_request: bool,
}

impl ConvState {
    pub fn with_lead(&self, lead: LeadPhase) -> Self {
        Self {
            lead,
            ..self.clone()
        }
    }

    pub fn with_pending(&self, pending_request: bool) -> Self {
        Self {
            pending_request,
            ..self.clone()
        }
    }
}

/// Context for a conversation (immutable configuration)
#[derive(Debug, Clone)]
pub struct ConvContext {
    /// Page or surface the widget is embedded in
    pub context_id: String,
    /// User messages needed before the lead prompt appears
    pub lead_threshold: usize,
}

impl ConvContext {
    pub fn new(context_id: impl Into<String>) -> Self {
        Self {
            context_id: context_id.into(),
            lead_threshold: LEAD_PROMPT_THRESHOLD,
        }
    }

    /// Source tag recorded with captured leads
    pub fn lead_source(&self) -> String {
        format!("rag:{}", self.context_id)
    }
}
