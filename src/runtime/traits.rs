//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the dispatcher with mock implementations.

use crate::assistant::{AssistantError, AssistantRequest, RawResponse};
use crate::state_machine::LeadRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// Client for the assistant endpoint
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Send one query. `Err` only for transport failures; any HTTP response,
    /// however malformed, comes back as `Ok`.
    async fn query(&self, request: &AssistantRequest) -> Result<RawResponse, AssistantError>;
}

/// Destination for captured leads
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Deliver a lead. The caller logs failures and moves on.
    async fn submit(&self, record: &LeadRecord) -> Result<(), AssistantError>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: AssistantClient + ?Sized> AssistantClient for Arc<T> {
    async fn query(&self, request: &AssistantRequest) -> Result<RawResponse, AssistantError> {
        (**self).query(request).await
    }
}

#[async_trait]
impl<T: LeadSink + ?Sized> LeadSink for Arc<T> {
    async fn submit(&self, record: &LeadRecord) -> Result<(), AssistantError> {
        (**self).submit(record).await
    }
}
