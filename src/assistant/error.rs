//! Assistant error taxonomy
//!
//! These never reach the user. They exist so the log channel can say what
//! went wrong while the conversation shows a fallback answer.

use thiserror::Error;

/// Assistant error with classification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssistantError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AssistantError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Protocol, message)
    }

    pub fn semantic(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Semantic, message)
    }
}

/// Where in the exchange things broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, DNS, timeouts, unreadable response stream
    Transport,
    /// Wrong content type or a body that is not the JSON we expect
    Protocol,
    /// Valid JSON without a usable answer, or an explicit `error` field
    Semantic,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Semantic => "semantic",
        }
    }
}
