//! Response classification and fallback answers
//!
//! Whatever the assistant endpoint does, the user gets an on-topic answer.
//! [`resolve`] walks an ordered chain of checks over the raw exchange and
//! the first one that matches decides the answer text and its sources.

use super::{AssistantError, RawResponse, RelatedDoc};
use crate::conversation::Source;
use serde_json::{Map, Value};

/// Fields that may carry the answer text, in lookup order
const ANSWER_FIELDS: [&str; 3] = ["answer", "message", "text"];

const CAPABILITY_OVERVIEW: &str = "PalC Networks helps teams design, build and operate modern networks:\n\n\
• **SONiC & Open Networking**: NOS development, hardening and production support on white-box switches.\n\
• **AI Fabric Networking**: lossless Ethernet fabrics engineered for GPU clusters.\n\
• **Cloud & Hybrid Networking**: consistent connectivity across data centers and public clouds.\n\
• **EVPN/VXLAN Overlays**: scalable multi-tenant data center designs.\n\
• **Network Automation**: infrastructure as code, CI/CD pipelines and closed-loop operations.\n\n\
Browse the [Solutions Overview](/solutions) or [talk to our engineers](/contact) about your project.";

const APOLOGY_PREAMBLE: &str =
    "Sorry, I ran into a problem answering that just now. Here is an overview of what we do in the meantime.";

/// Opening line placed before the capability overview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preamble<'a> {
    None,
    Apology,
    /// Acknowledge the query we could not answer
    EchoQuery(&'a str),
}

/// The generic "what we do" answer used by every fallback branch
pub fn capability_overview(preamble: Preamble<'_>) -> String {
    match preamble {
        Preamble::None => CAPABILITY_OVERVIEW.to_string(),
        Preamble::Apology => format!("{APOLOGY_PREAMBLE}\n\n{CAPABILITY_OVERVIEW}"),
        Preamble::EchoQuery(query) => format!(
            "I couldn't find a specific answer to \"{query}\". Here is an overview of what we do.\n\n{CAPABILITY_OVERVIEW}"
        ),
    }
}

/// Sources attached when the endpoint could not be reached at all
pub fn overview_sources() -> Vec<Source> {
    vec![
        Source::new(
            "Solutions Overview",
            "/solutions",
            "End-to-end networking solutions, from architecture to day-2 operations.",
        ),
        Source::new(
            "SONiC & Open Networking",
            "/services/sonic",
            "SONiC development, integration, testing and enterprise support.",
        ),
    ]
}

/// Why the capability overview was substituted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The request never produced a response
    Transport,
    /// Error status and a body that is not declared or parseable JSON
    UnreadableErrorBody,
    /// Error status with JSON but no answer field
    ErrorStatusWithoutAnswer,
    /// Success status but the body is not a JSON object
    NotAnObject,
    /// Success status with an `error` field and no answer
    ReportedError,
    /// Success status with no usable answer field
    MissingAnswer,
}

/// How the final answer was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Healthy response
    Answered,
    /// Success status, `error` set, but an answer came along anyway
    Degraded,
    /// Error status whose JSON body still carried an answer
    Recovered,
    /// Capability overview substituted
    Fallback(FallbackReason),
}

impl Outcome {
    /// Whether category copy may be appended to the answer
    pub fn allows_augmentation(self) -> bool {
        matches!(self, Outcome::Answered | Outcome::Degraded)
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Outcome::Fallback(_))
    }
}

/// Final answer for one assistant turn
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub answer: String,
    pub sources: Vec<Source>,
    /// Sidebar documents; empty means leave the sidebar alone
    pub related: Vec<RelatedDoc>,
    pub outcome: Outcome,
    /// Developer-facing description of what went wrong, if anything
    pub diagnostic: Option<AssistantError>,
}

impl Resolution {
    fn fallback(
        answer: String,
        sources: Vec<Source>,
        related: Vec<RelatedDoc>,
        reason: FallbackReason,
        diagnostic: AssistantError,
    ) -> Self {
        Self {
            answer,
            sources,
            related,
            outcome: Outcome::Fallback(reason),
            diagnostic: Some(diagnostic),
        }
    }
}

/// Classify one assistant exchange; first matching rule wins.
pub fn resolve(query: &str, result: Result<RawResponse, AssistantError>) -> Resolution {
    let response = match result {
        Ok(response) => response,
        Err(error) => {
            return Resolution::fallback(
                capability_overview(Preamble::None),
                overview_sources(),
                vec![],
                FallbackReason::Transport,
                error,
            );
        }
    };

    let status = response.status;
    let body = response.json_body();

    if !response.is_success() {
        let Some(body) = body else {
            return Resolution::fallback(
                capability_overview(Preamble::None),
                vec![],
                vec![],
                FallbackReason::UnreadableErrorBody,
                AssistantError::protocol(format!(
                    "HTTP {status} ({}): {}",
                    response.content_type.as_deref().unwrap_or("no content-type"),
                    response.snippet()
                )),
            );
        };

        let fields = body.as_object();
        let sources = fields.map(sources_of).unwrap_or_default();
        let related = fields.map(related_of).unwrap_or_default();

        return match fields.and_then(answer_of) {
            Some(answer) => Resolution {
                answer,
                sources,
                related,
                outcome: Outcome::Recovered,
                diagnostic: Some(AssistantError::semantic(format!(
                    "HTTP {status} but body carried an answer"
                ))),
            },
            None => Resolution::fallback(
                capability_overview(Preamble::None),
                sources,
                related,
                FallbackReason::ErrorStatusWithoutAnswer,
                AssistantError::semantic(format!(
                    "HTTP {status} without an answer: {}",
                    response.snippet()
                )),
            ),
        };
    }

    let Some(Value::Object(fields)) = body else {
        return Resolution::fallback(
            capability_overview(Preamble::None),
            vec![],
            vec![],
            FallbackReason::NotAnObject,
            AssistantError::protocol(format!(
                "HTTP {status} body is not a JSON object ({}): {}",
                response.content_type.as_deref().unwrap_or("no content-type"),
                response.snippet()
            )),
        );
    };

    let related = related_of(&fields);

    if let Some(error) = fields.get("error").filter(|v| !v.is_null()) {
        return match fields.get("answer").and_then(usable_text) {
            Some(answer) => Resolution {
                answer,
                sources: sources_of(&fields),
                related,
                outcome: Outcome::Degraded,
                diagnostic: Some(AssistantError::semantic(format!(
                    "Answer returned alongside error: {error}"
                ))),
            },
            None => Resolution::fallback(
                capability_overview(Preamble::Apology),
                vec![],
                related,
                FallbackReason::ReportedError,
                AssistantError::semantic(format!("Assistant reported error: {error}")),
            ),
        };
    }

    match answer_of(&fields) {
        Some(answer) => Resolution {
            answer,
            sources: sources_of(&fields),
            related,
            outcome: Outcome::Answered,
            diagnostic: None,
        },
        None => Resolution::fallback(
            capability_overview(Preamble::EchoQuery(query)),
            vec![],
            related,
            FallbackReason::MissingAnswer,
            AssistantError::semantic(format!(
                "No usable answer field: {}",
                response.snippet()
            )),
        ),
    }
}

/// A string with at least one non-whitespace character, returned verbatim
fn usable_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn answer_of(fields: &Map<String, Value>) -> Option<String> {
    ANSWER_FIELDS
        .iter()
        .find_map(|name| fields.get(*name).and_then(usable_text))
}

/// Entries that do not look like sources are skipped
fn sources_of(fields: &Map<String, Value>) -> Vec<Source> {
    parse_array(fields.get("sources"))
}

fn related_of(fields: &Map<String, Value>) -> Vec<RelatedDoc> {
    parse_array(fields.get("related"))
}

fn parse_array<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
