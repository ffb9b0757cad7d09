//! MCP resources exposing flow configurations.

use crate::protocol::{ResourceContents, ResourceSchema};
use flowise_client::FlowiseClient;

const FLOWS_URI: &str = "flowise://flows";
const FLOW_URI_PREFIX: &str = "flowise://flow/";
const MIME_JSON: &str = "application/json";

/// List the resources this server exposes.
pub fn list_resources() -> Vec<ResourceSchema> {
    vec![
        ResourceSchema {
            uri: FLOWS_URI.to_string(),
            name: "All Flows".to_string(),
            description: "List of all chatflows and agentflows in the Flowise instance"
                .to_string(),
            mime_type: MIME_JSON.to_string(),
        },
        ResourceSchema {
            uri: format!("{}{{flow_id}}", FLOW_URI_PREFIX),
            name: "Flow Configuration".to_string(),
            description: "Full configuration of a specific flow by ID".to_string(),
            mime_type: MIME_JSON.to_string(),
        },
    ]
}

/// Read a resource by URI, fetching from the Flowise instance.
pub async fn read_resource(
    uri: &str,
    client: &FlowiseClient,
) -> Result<ResourceContents, String> {
    let value = if uri == FLOWS_URI {
        client.flows().list().await.map_err(|e| e.user_message())?
    } else if let Some(flow_id) = uri.strip_prefix(FLOW_URI_PREFIX) {
        if flow_id.is_empty() {
            return Err("Missing flow ID in resource URI".to_string());
        }
        client
            .flows()
            .get(flow_id)
            .await
            .map_err(|e| e.user_message())?
    } else {
        return Err(format!("Unknown resource URI: {}", uri));
    };

    let text = serde_json::to_string_pretty(&value)
        .map_err(|e| format!("Failed to serialize resource: {}", e))?;

    Ok(ResourceContents {
        uri: uri.to_string(),
        mime_type: MIME_JSON.to_string(),
        text,
    })
}
