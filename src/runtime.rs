//! Runtime for executing conversations
//!
//! Owns the message store and conversation state, runs effects produced by
//! the state machine, and guards against overlapping sends.

mod controller;
mod dispatcher;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use controller::{WidgetController, WidgetError};
pub use dispatcher::{ConversationView, Dispatcher};
pub use traits::*;

use crate::assistant::{build_http_client, HttpAssistantClient, HttpLeadSink};
use crate::config::{ConfigError, WidgetConfig};
use crate::state_machine::ConvContext;

/// Controller wired to the real HTTP endpoints
pub type HttpWidgetController = WidgetController<HttpAssistantClient, HttpLeadSink>;

/// Build a controller for `config` that talks to the configured endpoints
pub fn connect(config: &WidgetConfig) -> Result<HttpWidgetController, ConfigError> {
    let client = build_http_client()?;
    let assistant = HttpAssistantClient::new(client.clone(), config.assistant_endpoint());
    let leads = HttpLeadSink::new(client, config.lead_endpoint());

    tracing::info!(
        assistant = %assistant.endpoint(),
        context_id = %config.context_id,
        "Assistant widget connected"
    );

    let mut dispatcher = Dispatcher::new(ConvContext::new(&config.context_id), assistant, leads);
    if let Some(greeting) = &config.greeting {
        dispatcher = dispatcher.with_greeting(greeting);
    }
    Ok(WidgetController::new(dispatcher))
}
