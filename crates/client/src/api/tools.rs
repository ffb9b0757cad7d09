//! Tools API endpoints.

use crate::client::FlowiseClient;
use crate::error::FlowiseResult;
use serde_json::Value;

/// Tools API for listing tools registered in Flowise.
pub struct ToolsApi<'a> {
    client: &'a FlowiseClient,
}

impl<'a> ToolsApi<'a> {
    pub(crate) fn new(client: &'a FlowiseClient) -> Self {
        Self { client }
    }

    /// List all registered tools.
    pub async fn list(&self) -> FlowiseResult<Value> {
        self.client.http.get("tools").await
    }
}
