//! Events that can occur in a conversation

use crate::assistant::Resolution;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// The user sent a query
    UserSubmitted { text: String },

    /// The assistant exchange for `query` finished, one way or another
    AssistantResolved {
        query: String,
        resolution: Resolution,
    },

    /// An assistant turn was appended; `user_turns` counts user messages so far
    TurnCompleted { user_turns: usize },
}
