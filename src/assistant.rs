//! Assistant endpoint integration
//!
//! Wire types, the HTTP adapters for the assistant and lead-collector
//! endpoints, and the fallback chain that turns whatever came back into an
//! answer worth showing.

pub mod augment;
mod error;
pub mod fallback;
mod http;
mod types;

pub use error::{AssistantError, ErrorKind};
pub use fallback::{resolve, FallbackReason, Outcome, Resolution};
pub use http::{build_http_client, HttpAssistantClient, HttpLeadSink};
pub use types::*;
