//! Variables API endpoints.

use crate::client::FlowiseClient;
use crate::error::FlowiseResult;
use serde_json::Value;

/// Variables API for listing global Flowise variables.
pub struct VariablesApi<'a> {
    client: &'a FlowiseClient,
}

impl<'a> VariablesApi<'a> {
    pub(crate) fn new(client: &'a FlowiseClient) -> Self {
        Self { client }
    }

    /// List all variables.
    pub async fn list(&self) -> FlowiseResult<Value> {
        self.client.http.get("variables").await
    }
}
