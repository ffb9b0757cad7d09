// Chat history tools

use crate::format::{truncate, ResponseFormat};
use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use crate::tools::{
    json_schema_number, json_schema_object, json_schema_response_format, json_schema_string,
    parse_args, Tool,
};
use anyhow::Result;
use flowise_client::{ChatHistoryQuery, DeleteChatHistoryQuery, FlowiseClient};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

fn default_limit() -> usize {
    50
}

/// Tool to fetch conversation history for a flow.
pub struct GetChatHistoryTool {
    client: Arc<FlowiseClient>,
}

impl GetChatHistoryTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetChatHistoryArgs {
    flow_id: String,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    response_format: ResponseFormat,
}

#[async_trait::async_trait]
impl Tool for GetChatHistoryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_get_chat_history".to_string(),
            description: "Retrieve chat message history for a specific flow, useful for \
                          reviewing past interactions or debugging."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "flow_id": json_schema_string("The chatflow or agentflow ID"),
                    "session_id": json_schema_string("Optional session ID to filter messages"),
                    "limit": json_schema_number("Maximum number of messages to retrieve (default 50, max 500)"),
                    "response_format": json_schema_response_format()
                }),
                vec!["flow_id"],
            ),
            annotations: Some(ToolAnnotations::read_only("Get Chat History")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: GetChatHistoryArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };
        let limit = args.limit.clamp(1, 500);

        let query = ChatHistoryQuery {
            chatflowid: args.flow_id,
            session_id: args.session_id,
        };

        let messages = match self.client.chat_messages().history(&query).await {
            Ok(response) => response,
            Err(e) => return Ok(CallToolResult::error(e.user_message())),
        };

        let list: Vec<Value> = messages
            .as_array()
            .map(|a| a.iter().take(limit).cloned().collect())
            .unwrap_or_default();

        if args.response_format == ResponseFormat::Json {
            return Ok(CallToolResult::text(serde_json::to_string_pretty(&list)?));
        }

        if list.is_empty() {
            return Ok(CallToolResult::text("No chat history found for this flow."));
        }

        let mut lines = vec!["# Chat History\n".to_string()];
        for msg in &list {
            let role = msg.get("role").and_then(Value::as_str).unwrap_or("unknown");
            let content = msg.get("content").and_then(Value::as_str).unwrap_or("");
            let timestamp = msg.get("createdDate").and_then(Value::as_str).unwrap_or("N/A");
            let role_indicator = if role == "user" { "[USER]" } else { "[BOT]" };

            lines.push(format!("### {} {} ({})", role_indicator, role, timestamp));
            lines.push(truncate(content, 500));
            lines.push(String::new());
        }

        Ok(CallToolResult::text(lines.join("\n")))
    }
}

/// Tool to delete conversation history for a flow.
pub struct DeleteChatHistoryTool {
    client: Arc<FlowiseClient>,
}

impl DeleteChatHistoryTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct DeleteChatHistoryArgs {
    flow_id: String,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    chat_id: Option<String>,
}

#[async_trait::async_trait]
impl Tool for DeleteChatHistoryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_delete_chat_history".to_string(),
            description: "Delete chat message history for a specific flow. Optionally \
                          scoped to one session or chat. Use with caution."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "flow_id": json_schema_string("The chatflow or agentflow ID"),
                    "session_id": json_schema_string("Optional session ID to delete a specific session"),
                    "chat_id": json_schema_string("Optional chat ID to delete a specific chat")
                }),
                vec!["flow_id"],
            ),
            annotations: Some(ToolAnnotations::destructive("Delete Chat History")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: DeleteChatHistoryArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        let query = DeleteChatHistoryQuery {
            session_id: args.session_id.clone(),
            chat_id: args.chat_id.clone(),
        };

        match self.client.chat_messages().delete(&args.flow_id, &query).await {
            Ok(_) => {
                let scope = if let Some(session_id) = &args.session_id {
                    format!("session `{}`", session_id)
                } else if let Some(chat_id) = &args.chat_id {
                    format!("chat `{}`", chat_id)
                } else {
                    "all messages".to_string()
                };
                Ok(CallToolResult::text(format!(
                    "Chat history deleted for flow `{}` ({}).",
                    args.flow_id, scope
                )))
            }
            Err(e) => Ok(CallToolResult::error(e.user_message())),
        }
    }
}
