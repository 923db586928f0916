//! Conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions. The
//! transition function decides what happens next; the runtime performs the
//! resulting effects and feeds follow-up events back in.

mod effect;
pub mod event;
pub mod lead;
pub mod state;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::Event;
pub use lead::{extract_contact, LeadRecord};
pub use state::{ConvContext, ConvState, LeadPhase};
pub use transition::{transition, TransitionError, TransitionResult};
