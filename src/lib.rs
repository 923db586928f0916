//! Conversational assistant engine for the site's "ask the assistant" widget
//!
//! Turns free-text questions into displayed answers: keeps the ordered turn
//! history, calls the assistant endpoint with a fallback chain for every
//! way it can misbehave, and slips a one-time lead-capture exchange into the
//! conversation.

pub mod assistant;
pub mod config;
pub mod conversation;
pub mod markup;
pub mod runtime;
pub mod state_machine;

pub use config::{ConfigError, WidgetConfig};
pub use conversation::{Message, MessageKind, MessageStore, Role, Source};
pub use runtime::{connect, ConversationView, Dispatcher, HttpWidgetController, WidgetController, WidgetError};
pub use state_machine::{LeadPhase, LeadRecord};
