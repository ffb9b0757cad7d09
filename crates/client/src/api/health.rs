//! Health API endpoints.

use crate::client::FlowiseClient;
use crate::error::FlowiseResult;
use serde_json::Value;

/// Health API for checking instance reachability.
pub struct HealthApi<'a> {
    client: &'a FlowiseClient,
}

impl<'a> HealthApi<'a> {
    pub(crate) fn new(client: &'a FlowiseClient) -> Self {
        Self { client }
    }

    /// Ping the Flowise instance.
    pub async fn ping(&self) -> FlowiseResult<Value> {
        self.client.http.get("ping").await
    }
}
