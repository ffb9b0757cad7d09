// Assistant tools

use crate::format::{truncate, ResponseFormat};
use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use crate::tools::{
    json_schema_object, json_schema_response_format, json_schema_string, parse_args, Tool,
};
use anyhow::Result;
use flowise_client::FlowiseClient;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("N/A")
}

/// Tool to list configured assistants.
pub struct ListAssistantsTool {
    client: Arc<FlowiseClient>,
}

impl ListAssistantsTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ListAssistantsArgs {
    #[serde(default)]
    response_format: ResponseFormat,
}

#[async_trait::async_trait]
impl Tool for ListAssistantsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_list_assistants".to_string(),
            description: "List all assistants configured in Flowise. Assistants are \
                          pre-configured AI agents for specific tasks."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "response_format": json_schema_response_format()
                }),
                vec![],
            ),
            annotations: Some(ToolAnnotations::read_only("List Flowise Assistants")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ListAssistantsArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        let assistants = match self.client.assistants().list().await {
            Ok(response) => response,
            Err(e) => return Ok(CallToolResult::error(e.user_message())),
        };

        if args.response_format == ResponseFormat::Json {
            return Ok(CallToolResult::text(
                serde_json::to_string_pretty(&assistants)?,
            ));
        }

        let list = assistants.as_array().cloned().unwrap_or_default();
        if list.is_empty() {
            return Ok(CallToolResult::text("No assistants configured."));
        }

        let mut lines = vec!["# Flowise Assistants\n".to_string()];
        for assistant in &list {
            lines.push(format!(
                "## {}",
                assistant.get("name").and_then(Value::as_str).unwrap_or("Unnamed")
            ));
            lines.push(format!("- **ID**: `{}`", str_field(assistant, "id")));
            lines.push(format!("- **Model**: {}", str_field(assistant, "model")));
            if let Some(description) = assistant.get("description").and_then(Value::as_str) {
                lines.push(format!("- **Description**: {}", description));
            }
            lines.push(String::new());
        }

        Ok(CallToolResult::text(lines.join("\n")))
    }
}

/// Tool to get one assistant's details.
pub struct GetAssistantTool {
    client: Arc<FlowiseClient>,
}

impl GetAssistantTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetAssistantArgs {
    assistant_id: String,
    #[serde(default)]
    response_format: ResponseFormat,
}

#[async_trait::async_trait]
impl Tool for GetAssistantTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_get_assistant".to_string(),
            description: "Get detailed information about a specific assistant, including \
                          its configuration."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "assistant_id": json_schema_string("The unique identifier of the assistant"),
                    "response_format": json_schema_response_format()
                }),
                vec!["assistant_id"],
            ),
            annotations: Some(ToolAnnotations::read_only("Get Assistant Details")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: GetAssistantArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        let assistant = match self.client.assistants().get(&args.assistant_id).await {
            Ok(response) => response,
            Err(e) => return Ok(CallToolResult::error(e.user_message())),
        };

        if args.response_format == ResponseFormat::Json {
            return Ok(CallToolResult::text(
                serde_json::to_string_pretty(&assistant)?,
            ));
        }

        let mut lines = vec![
            format!(
                "# Assistant: {}",
                assistant.get("name").and_then(Value::as_str).unwrap_or("Unnamed")
            ),
            String::new(),
            format!("**ID**: `{}`", str_field(&assistant, "id")),
            format!("**Model**: {}", str_field(&assistant, "model")),
            format!(
                "**Temperature**: {}",
                assistant
                    .get("temperature")
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "N/A".to_string())
            ),
        ];

        if let Some(description) = assistant.get("description").and_then(Value::as_str) {
            lines.push(format!("**Description**: {}", description));
        }

        if let Some(instructions) = assistant.get("instructions").and_then(Value::as_str) {
            lines.push(String::new());
            lines.push("## Instructions".to_string());
            lines.push(truncate(instructions, 500));
        }

        if let Some(tools) = assistant.get("tools").and_then(Value::as_array) {
            if !tools.is_empty() {
                lines.push(String::new());
                lines.push("## Tools".to_string());
                for tool in tools {
                    lines.push(format!(
                        "- {}",
                        tool.get("type").and_then(Value::as_str).unwrap_or("Unknown")
                    ));
                }
            }
        }

        Ok(CallToolResult::text(lines.join("\n")))
    }
}
