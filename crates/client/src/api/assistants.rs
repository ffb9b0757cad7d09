//! Assistants API endpoints.

use crate::client::FlowiseClient;
use crate::error::FlowiseResult;
use serde_json::Value;

/// Assistants API for listing and inspecting configured assistants.
pub struct AssistantsApi<'a> {
    client: &'a FlowiseClient,
}

impl<'a> AssistantsApi<'a> {
    pub(crate) fn new(client: &'a FlowiseClient) -> Self {
        Self { client }
    }

    /// List all assistants.
    pub async fn list(&self) -> FlowiseResult<Value> {
        self.client.http.get("assistants").await
    }

    /// Get a specific assistant by ID.
    pub async fn get(&self, assistant_id: &str) -> FlowiseResult<Value> {
        self.client
            .http
            .get(&format!("assistants/{}", assistant_id))
            .await
    }
}
