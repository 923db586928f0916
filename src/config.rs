//! Widget configuration
//!
//! Resolved once by the embedding application and passed in; nothing in the
//! engine reads the environment on its own.

use thiserror::Error;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_CONTEXT_ID: &str = "homepage";

/// Configuration for one assistant widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Origin hosting `/api/rag` and `/api/lead`
    pub assistant_base_url: String,
    /// Page or surface the widget is embedded in
    pub context_id: String,
    /// Optional assistant turn shown before the user says anything
    pub greeting: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_CONTEXT_ID)
    }
}

impl WidgetConfig {
    pub fn new(assistant_base_url: impl Into<String>, context_id: impl Into<String>) -> Self {
        Self {
            assistant_base_url: assistant_base_url.into(),
            context_id: context_id.into(),
            greeting: None,
        }
    }

    pub fn from_env() -> Self {
        Self {
            assistant_base_url: std::env::var("RAG_ASSIST_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            context_id: std::env::var("RAG_ASSIST_CONTEXT_ID")
                .unwrap_or_else(|_| DEFAULT_CONTEXT_ID.to_string()),
            greeting: std::env::var("RAG_ASSIST_GREETING")
                .ok()
                .filter(|g| !g.trim().is_empty()),
        }
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    pub fn assistant_endpoint(&self) -> String {
        self.endpoint("/api/rag")
    }

    pub fn lead_endpoint(&self) -> String {
        self.endpoint("/api/lead")
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.assistant_base_url.trim_end_matches('/'))
    }
}

/// Errors setting up the HTTP side of a widget
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
