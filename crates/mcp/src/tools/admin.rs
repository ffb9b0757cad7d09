// Variables, tools listing and ping

use crate::format::{truncate, ResponseFormat};
use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use crate::tools::{json_schema_object, json_schema_response_format, parse_args, Tool};
use anyhow::Result;
use flowise_client::FlowiseClient;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct FormatOnlyArgs {
    #[serde(default)]
    response_format: ResponseFormat,
}

/// Tool to list global Flowise variables.
pub struct ListVariablesTool {
    client: Arc<FlowiseClient>,
}

impl ListVariablesTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListVariablesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_list_variables".to_string(),
            description: "List all global variables configured in Flowise. Variables \
                          store API keys, URLs, or other configuration shared across flows."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "response_format": json_schema_response_format()
                }),
                vec![],
            ),
            annotations: Some(ToolAnnotations::read_only("List Flowise Variables")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: FormatOnlyArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        let variables = match self.client.variables().list().await {
            Ok(response) => response,
            Err(e) => return Ok(CallToolResult::error(e.user_message())),
        };

        if args.response_format == ResponseFormat::Json {
            return Ok(CallToolResult::text(serde_json::to_string_pretty(
                &variables,
            )?));
        }

        let list = variables.as_array().cloned().unwrap_or_default();
        if list.is_empty() {
            return Ok(CallToolResult::text("No variables configured."));
        }

        let mut lines = vec!["# Flowise Variables\n".to_string()];
        for var in &list {
            let value = var.get("value").and_then(Value::as_str).unwrap_or("");
            lines.push(format!(
                "- **{}**: `{}`",
                var.get("name").and_then(Value::as_str).unwrap_or("Unnamed"),
                truncate(value, 50),
            ));
        }

        Ok(CallToolResult::text(lines.join("\n")))
    }
}

/// Tool to list tools registered in Flowise.
pub struct ListToolsTool {
    client: Arc<FlowiseClient>,
}

impl ListToolsTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListToolsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_list_tools".to_string(),
            description: "List all tools registered in Flowise that can be used in \
                          agentflows and chatflows."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "response_format": json_schema_response_format()
                }),
                vec![],
            ),
            annotations: Some(ToolAnnotations::read_only("List Available Tools")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: FormatOnlyArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        let tools = match self.client.tools().list().await {
            Ok(response) => response,
            Err(e) => return Ok(CallToolResult::error(e.user_message())),
        };

        if args.response_format == ResponseFormat::Json {
            return Ok(CallToolResult::text(serde_json::to_string_pretty(&tools)?));
        }

        let list = tools.as_array().cloned().unwrap_or_default();
        if list.is_empty() {
            return Ok(CallToolResult::text("No custom tools configured."));
        }

        let mut lines = vec!["# Available Tools\n".to_string()];
        for tool in &list {
            lines.push(format!(
                "## {}",
                tool.get("name").and_then(Value::as_str).unwrap_or("Unnamed")
            ));
            if let Some(description) = tool.get("description").and_then(Value::as_str) {
                lines.push(description.to_string());
            }
            lines.push(String::new());
        }

        Ok(CallToolResult::text(lines.join("\n")))
    }
}

/// Tool to check that the Flowise instance is reachable.
pub struct PingTool {
    client: Arc<FlowiseClient>,
}

impl PingTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct PingArgs {}

#[async_trait::async_trait]
impl Tool for PingTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_ping".to_string(),
            description: "Check if the Flowise server is reachable and responding. Use \
                          this to verify connectivity before making other requests."
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
            annotations: Some(ToolAnnotations::read_only("Ping Flowise Server")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let _args: PingArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        match self.client.health().ping().await {
            Ok(_) => Ok(CallToolResult::text(format!(
                "Flowise server at `{}` is responding.",
                self.client.base_url()
            ))),
            Err(e) => Ok(CallToolResult::error(e.user_message())),
        }
    }
}
