//! Flow (chatflow/agentflow) API endpoints.

use crate::client::FlowiseClient;
use crate::error::FlowiseResult;
use serde::Serialize;
use serde_json::Value;

/// Flows API for managing chatflows and agentflows.
pub struct FlowsApi<'a> {
    client: &'a FlowiseClient,
}

impl<'a> FlowsApi<'a> {
    pub(crate) fn new(client: &'a FlowiseClient) -> Self {
        Self { client }
    }

    /// List all flows.
    pub async fn list(&self) -> FlowiseResult<Value> {
        self.client.http.get("chatflows").await
    }

    /// Get a specific flow by ID.
    pub async fn get(&self, flow_id: &str) -> FlowiseResult<Value> {
        self.client.http.get(&format!("chatflows/{}", flow_id)).await
    }

    /// Create a new flow.
    pub async fn create(&self, request: &CreateFlowRequest) -> FlowiseResult<Value> {
        self.client.http.post("chatflows", request).await
    }

    /// Update an existing flow. Only the provided fields are sent.
    pub async fn update(&self, flow_id: &str, request: &UpdateFlowRequest) -> FlowiseResult<Value> {
        self.client
            .http
            .put(&format!("chatflows/{}", flow_id), request)
            .await
    }

    /// Delete a flow.
    pub async fn delete(&self, flow_id: &str) -> FlowiseResult<Value> {
        self.client
            .http
            .delete(&format!("chatflows/{}", flow_id))
            .await
    }
}

/// Request body for creating a flow.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlowRequest {
    pub name: String,
    pub flow_data: String,
    #[serde(rename = "type")]
    pub flow_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Request body for updating a flow. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlowRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl UpdateFlowRequest {
    /// Whether any field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.flow_data.is_none()
            && self.is_public.is_none()
            && self.category.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_serializes_camel_case() {
        let request = CreateFlowRequest {
            name: "Support Bot".to_string(),
            flow_data: "{}".to_string(),
            flow_type: "CHATFLOW".to_string(),
            is_public: Some(true),
            category: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["name"], "Support Bot");
        assert_eq!(json["flowData"], "{}");
        assert_eq!(json["type"], "CHATFLOW");
        assert_eq!(json["isPublic"], true);
        assert!(json.get("category").is_none());
    }

    #[test]
    fn test_update_request_skips_absent_fields() {
        let request = UpdateFlowRequest {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Renamed"}));
    }

    #[test]
    fn test_update_request_is_empty() {
        assert!(UpdateFlowRequest::default().is_empty());
        assert!(!UpdateFlowRequest {
            category: Some("support".to_string()),
            ..Default::default()
        }
        .is_empty());
    }
}
