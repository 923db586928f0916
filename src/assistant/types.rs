//! Wire types for the assistant endpoint

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /api/rag`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    pub query: String,
    pub context_id: String,
    pub filters: Map<String, Value>,
}

impl AssistantRequest {
    pub fn new(query: impl Into<String>, context_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context_id: context_id.into(),
            filters: Map::new(),
        }
    }
}

/// Entry of the "related documents" sidebar
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelatedDoc {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub relevance: Option<f64>,
}

/// What came back over the wire, before any interpretation
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    /// Shorthand for a response with an `application/json` content type
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, Some("application/json"), body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
    }

    /// The parsed body, only when it is declared as JSON and actually parses
    pub fn json_body(&self) -> Option<Value> {
        if !self.is_json() {
            return None;
        }
        serde_json::from_str(&self.body).ok()
    }

    /// Leading part of the body for log lines
    pub fn snippet(&self) -> String {
        const MAX_SNIPPET_CHARS: usize = 200;
        self.body.chars().take(MAX_SNIPPET_CHARS).collect()
    }
}
