//! Widget controller: input events in, single-flight dispatch

use super::dispatcher::{ConversationView, Dispatcher};
use super::traits::{AssistantClient, LeadSink};
use crate::assistant::RelatedDoc;
use crate::conversation::Message;
use crate::state_machine::LeadPhase;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::{watch, Mutex};

/// Reasons a submission was not dispatched
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WidgetError {
    #[error("A message is already being answered")]
    Busy,
    #[error("Message is empty")]
    EmptyInput,
}

/// Sets the busy flag on creation and clears it on drop, so the flag is
/// released even if the dispatch panics or its future is dropped.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Front door for the embedding UI
pub struct WidgetController<C, L>
where
    C: AssistantClient,
    L: LeadSink,
{
    dispatcher: Mutex<Dispatcher<C, L>>,
    view: watch::Receiver<ConversationView>,
    busy: AtomicBool,
}

impl<C, L> WidgetController<C, L>
where
    C: AssistantClient,
    L: LeadSink,
{
    pub fn new(dispatcher: Dispatcher<C, L>) -> Self {
        Self {
            view: dispatcher.subscribe(),
            dispatcher: Mutex::new(dispatcher),
            busy: AtomicBool::new(false),
        }
    }

    /// Dispatch `text` unless it is blank or another message is in flight.
    ///
    /// The text is forwarded verbatim; blank input never touches the store.
    pub async fn submit(&self, text: &str) -> Result<(), WidgetError> {
        if text.trim().is_empty() {
            return Err(WidgetError::EmptyInput);
        }
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            tracing::debug!("Submission ignored while busy");
            return Err(WidgetError::Busy);
        };

        self.dispatcher.lock().await.send(text).await;
        Ok(())
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Receiver that is notified whenever the conversation changes.
    ///
    /// Never waits on an in-flight request.
    pub fn subscribe(&self) -> watch::Receiver<ConversationView> {
        self.view.clone()
    }

    /// Snapshot of the conversation, in append order
    pub fn messages(&self) -> Vec<Message> {
        self.view.borrow().messages.clone()
    }

    pub fn lead_phase(&self) -> LeadPhase {
        self.view.borrow().lead.clone()
    }

    pub fn related(&self) -> Vec<RelatedDoc> {
        self.view.borrow().related.clone()
    }
}
