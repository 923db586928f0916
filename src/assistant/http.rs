//! reqwest adapters for the assistant and lead-collector endpoints

use super::{AssistantError, AssistantRequest, RawResponse};
use crate::runtime::{AssistantClient, LeadSink};
use crate::state_machine::LeadRecord;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// Shared HTTP client for both endpoints.
///
/// No request timeout is set; calls run until the network stack gives up.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().build()
}

/// Talks to `POST <base>/api/rag`
#[derive(Clone)]
pub struct HttpAssistantClient {
    client: Client,
    endpoint: String,
}

impl HttpAssistantClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AssistantClient for HttpAssistantClient {
    async fn query(&self, request: &AssistantRequest) -> Result<RawResponse, AssistantError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::transport(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    AssistantError::transport(format!("Connection failed: {e}"))
                } else {
                    AssistantError::transport(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| AssistantError::transport(format!("Failed to read response: {e}")))?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Fire-and-forget `POST <base>/api/lead`
#[derive(Clone)]
pub struct HttpLeadSink {
    client: Client,
    endpoint: String,
}

impl HttpLeadSink {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl LeadSink for HttpLeadSink {
    async fn submit(&self, record: &LeadRecord) -> Result<(), AssistantError> {
        // The collector's reply carries nothing we act on
        self.client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map(drop)
            .map_err(|e| AssistantError::transport(format!("Lead submission failed: {e}")))
    }
}
