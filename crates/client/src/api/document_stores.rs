//! Document store API endpoints.

use crate::client::FlowiseClient;
use crate::error::FlowiseResult;
use serde_json::Value;

/// Document stores API for listing and inspecting RAG document stores.
pub struct DocumentStoresApi<'a> {
    client: &'a FlowiseClient,
}

impl<'a> DocumentStoresApi<'a> {
    pub(crate) fn new(client: &'a FlowiseClient) -> Self {
        Self { client }
    }

    /// List all document stores.
    pub async fn list(&self) -> FlowiseResult<Value> {
        self.client.http.get("document-store/store").await
    }

    /// Get a specific document store by ID.
    pub async fn get(&self, store_id: &str) -> FlowiseResult<Value> {
        self.client
            .http
            .get(&format!("document-store/store/{}", store_id))
            .await
    }
}
