// Flow CRUD tools

use crate::format::{format_flow_detail, format_flow_list, ResponseFormat};
use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use crate::tools::{
    json_schema_boolean, json_schema_object, json_schema_response_format, json_schema_string,
    parse_args, Tool,
};
use anyhow::Result;
use flowise_client::{CreateFlowRequest, FlowiseClient, UpdateFlowRequest};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Tool to list all chatflows and agentflows.
pub struct ListFlowsTool {
    client: Arc<FlowiseClient>,
}

impl ListFlowsTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ListFlowsArgs {
    #[serde(default)]
    flow_type: Option<String>,
    #[serde(default)]
    response_format: ResponseFormat,
}

#[async_trait::async_trait]
impl Tool for ListFlowsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_list_flows".to_string(),
            description: "List all chatflows and agentflows in the Flowise instance, \
                          including their deployment status, visibility, and categories."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "flow_type": {
                        "type": "string",
                        "description": "Filter by flow type. Leave empty for all.",
                        "enum": ["CHATFLOW", "AGENTFLOW"]
                    },
                    "response_format": json_schema_response_format()
                }),
                vec![],
            ),
            annotations: Some(ToolAnnotations::read_only("List Flowise Flows")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ListFlowsArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        match self.client.flows().list().await {
            Ok(response) => {
                let mut flows: Vec<Value> =
                    response.as_array().cloned().unwrap_or_default();
                if let Some(flow_type) = &args.flow_type {
                    flows.retain(|f| {
                        f.get("type").and_then(Value::as_str) == Some(flow_type.as_str())
                    });
                }
                Ok(CallToolResult::text(format_flow_list(
                    &flows,
                    args.response_format,
                )))
            }
            Err(e) => Ok(CallToolResult::error(e.user_message())),
        }
    }
}

/// Tool to get one flow's full configuration.
pub struct GetFlowTool {
    client: Arc<FlowiseClient>,
}

impl GetFlowTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetFlowArgs {
    flow_id: String,
    #[serde(default)]
    response_format: ResponseFormat,
}

#[async_trait::async_trait]
impl Tool for GetFlowTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_get_flow".to_string(),
            description: "Get detailed information about a specific chatflow or agentflow, \
                          including its nodes and settings."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "flow_id": json_schema_string("The unique identifier of the chatflow or agentflow"),
                    "response_format": json_schema_response_format()
                }),
                vec!["flow_id"],
            ),
            annotations: Some(ToolAnnotations::read_only("Get Flowise Flow Details")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: GetFlowArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        match self.client.flows().get(&args.flow_id).await {
            Ok(flow) => Ok(CallToolResult::text(format_flow_detail(
                &flow,
                args.response_format,
            ))),
            Err(e) => Ok(CallToolResult::error(e.user_message())),
        }
    }
}

/// Tool to create a new flow.
pub struct CreateFlowTool {
    client: Arc<FlowiseClient>,
}

impl CreateFlowTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CreateFlowArgs {
    name: String,
    flow_data: String,
    #[serde(default)]
    flow_type: Option<String>,
    #[serde(default)]
    is_public: bool,
    #[serde(default)]
    category: Option<String>,
}

#[async_trait::async_trait]
impl Tool for CreateFlowTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_create_flow".to_string(),
            description: "Create a new chatflow or agentflow. flow_data must be a valid \
                          JSON string containing the nodes and edges configuration."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "name": json_schema_string("Name of the new chatflow or agentflow"),
                    "flow_data": json_schema_string("JSON string containing the flow configuration (nodes and edges)"),
                    "flow_type": {
                        "type": "string",
                        "description": "Type of flow (default CHATFLOW)",
                        "enum": ["CHATFLOW", "AGENTFLOW"]
                    },
                    "is_public": json_schema_boolean("Whether the flow should be publicly accessible"),
                    "category": json_schema_string("Categories separated by semicolons (e.g. 'category1;category2')")
                }),
                vec!["name", "flow_data"],
            ),
            annotations: Some(ToolAnnotations::mutating("Create New Flowise Flow")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: CreateFlowArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        if serde_json::from_str::<Value>(&args.flow_data).is_err() {
            return Ok(CallToolResult::error(
                "flow_data must be a valid JSON string",
            ));
        }

        let request = CreateFlowRequest {
            name: args.name,
            flow_data: args.flow_data,
            flow_type: args.flow_type.unwrap_or_else(|| "CHATFLOW".to_string()),
            is_public: if args.is_public { Some(true) } else { None },
            category: args.category,
        };

        match self.client.flows().create(&request).await {
            Ok(response) => Ok(CallToolResult::text(format!(
                "Flow created successfully!\n\n**ID**: `{}`\n**Name**: {}",
                response.get("id").and_then(Value::as_str).unwrap_or("N/A"),
                response.get("name").and_then(Value::as_str).unwrap_or("N/A"),
            ))),
            Err(e) => Ok(CallToolResult::error(e.user_message())),
        }
    }
}

/// Tool to update an existing flow.
pub struct UpdateFlowTool {
    client: Arc<FlowiseClient>,
}

impl UpdateFlowTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct UpdateFlowArgs {
    flow_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    flow_data: Option<String>,
    #[serde(default)]
    is_public: Option<bool>,
    #[serde(default)]
    category: Option<String>,
}

#[async_trait::async_trait]
impl Tool for UpdateFlowTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_update_flow".to_string(),
            description: "Update an existing chatflow or agentflow. Only provided fields \
                          are changed."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "flow_id": json_schema_string("The unique identifier of the flow to update"),
                    "name": json_schema_string("New name for the flow"),
                    "flow_data": json_schema_string("New flow configuration as JSON string"),
                    "is_public": json_schema_boolean("Whether the flow should be publicly accessible"),
                    "category": json_schema_string("New categories for the flow")
                }),
                vec!["flow_id"],
            ),
            annotations: Some(ToolAnnotations::mutating("Update Flowise Flow")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: UpdateFlowArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        if let Some(flow_data) = &args.flow_data {
            if serde_json::from_str::<Value>(flow_data).is_err() {
                return Ok(CallToolResult::error(
                    "flow_data must be a valid JSON string",
                ));
            }
        }

        let request = UpdateFlowRequest {
            name: args.name,
            flow_data: args.flow_data,
            is_public: args.is_public,
            category: args.category,
        };

        if request.is_empty() {
            return Ok(CallToolResult::error("No fields provided to update."));
        }

        match self.client.flows().update(&args.flow_id, &request).await {
            Ok(response) => Ok(CallToolResult::text(format!(
                "Flow updated successfully!\n\n**ID**: `{}`\n**Name**: {}",
                response.get("id").and_then(Value::as_str).unwrap_or("N/A"),
                response.get("name").and_then(Value::as_str).unwrap_or("N/A"),
            ))),
            Err(e) => Ok(CallToolResult::error(e.user_message())),
        }
    }
}

/// Tool to delete a flow.
pub struct DeleteFlowTool {
    client: Arc<FlowiseClient>,
}

impl DeleteFlowTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct DeleteFlowArgs {
    flow_id: String,
}

#[async_trait::async_trait]
impl Tool for DeleteFlowTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_delete_flow".to_string(),
            description: "Delete a chatflow or agentflow from Flowise. This action is \
                          irreversible."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "flow_id": json_schema_string("The unique identifier of the flow to delete")
                }),
                vec!["flow_id"],
            ),
            annotations: Some(ToolAnnotations::destructive("Delete Flowise Flow")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: DeleteFlowArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        match self.client.flows().delete(&args.flow_id).await {
            Ok(_) => Ok(CallToolResult::text(format!(
                "Flow `{}` has been deleted successfully.",
                args.flow_id
            ))),
            Err(e) => Ok(CallToolResult::error(e.user_message())),
        }
    }
}
