//! Vector store API endpoints.

use crate::client::FlowiseClient;
use crate::error::FlowiseResult;
use serde::Serialize;
use serde_json::{Map, Value};

/// Vectors API for upserting into and querying vector stores.
pub struct VectorsApi<'a> {
    client: &'a FlowiseClient,
}

impl<'a> VectorsApi<'a> {
    pub(crate) fn new(client: &'a FlowiseClient) -> Self {
        Self { client }
    }

    /// Trigger a flow's document processing pipeline to upsert vectors.
    pub async fn upsert(&self, flow_id: &str, request: &UpsertVectorRequest) -> FlowiseResult<Value> {
        self.client
            .http
            .post(&format!("vector/upsert/{}", flow_id), request)
            .await
    }

    /// Run a retrieval query against a document store's vector store.
    pub async fn query(&self, request: &VectorQueryRequest) -> FlowiseResult<Value> {
        self.client
            .http
            .post("document-store/vectorstore/query", request)
            .await
    }
}

/// Request body for a vector upsert.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpsertVectorRequest {
    #[serde(rename = "stopNodeId", skip_serializing_if = "Option::is_none")]
    pub stop_node_id: Option<String>,
    #[serde(rename = "overrideConfig", skip_serializing_if = "Option::is_none")]
    pub override_config: Option<Map<String, Value>>,
}

/// Request body for a vector store query.
#[derive(Debug, Clone, Serialize)]
pub struct VectorQueryRequest {
    #[serde(rename = "storeId")]
    pub store_id: String,
    pub query: String,
}
