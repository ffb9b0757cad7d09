//! MCP server: JSON-RPC 2.0 over stdio, newline-delimited.

use crate::protocol::{
    CallToolParams, CallToolResult, GetPromptParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListPromptsResult, ListResourcesResult, ListToolsResult,
    PromptsCapability, ReadResourceParams, ReadResourceResult, ResourcesCapability,
    ServerCapabilities, ServerInfo, ToolsCapability,
};
use crate::tools::ToolRegistry;
use crate::{prompts, resources};
use anyhow::{Context, Result};
use flowise_client::FlowiseClient;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "flowise-mcp";

/// MCP server bridging stdio JSON-RPC to a Flowise instance.
pub struct McpServer {
    registry: ToolRegistry,
    client: Arc<FlowiseClient>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, client: Arc<FlowiseClient>) -> Self {
        Self { registry, client }
    }

    /// Run the server over stdin/stdout until EOF.
    ///
    /// One JSON-RPC message per line. Notifications produce no response;
    /// everything else gets exactly one response line.
    pub async fn run_stdio(&self) -> Result<()> {
        info!(
            tools = self.registry.len(),
            upstream = %self.client.base_url(),
            "MCP server listening on stdio"
        );

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin);
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader
                .read_line(&mut line)
                .await
                .context("failed to read from stdin")?;
            if bytes_read == 0 {
                info!("stdin closed, shutting down");
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(trimmed).await {
                let serialized =
                    serde_json::to_string(&response).context("failed to serialize response")?;
                stdout.write_all(serialized.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        Ok(())
    }

    /// Handle one raw JSON-RPC message. Returns None for notifications.
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(raw) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "failed to parse JSON-RPC message");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(),
                ));
            }
        };

        debug!(method = %request.method, "handling request");

        if request.is_notification() {
            // initialized, notifications/cancelled etc. need no reply
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        let params = request.params.unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize_result()),
            "tools/list" => JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => self.handle_tool_call(id, params).await,
            "prompts/list" => JsonRpcResponse::success(
                id,
                ListPromptsResult {
                    prompts: prompts::list_prompts(),
                },
            ),
            "prompts/get" => self.handle_get_prompt(id, params),
            "resources/list" => JsonRpcResponse::success(
                id,
                ListResourcesResult {
                    resources: resources::list_resources(),
                },
            ),
            "resources/read" => self.handle_read_resource(id, params).await,
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            method => {
                warn!(method = %method, "unknown method");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(method))
            }
        };

        Some(response)
    }

    fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
                prompts: Some(PromptsCapability {
                    list_changed: false,
                }),
                resources: Some(ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Manage and interact with Flowise chatflows and agentflows: list, create, \
                 update and analyze flows, run predictions, query vector stores and inspect \
                 chat history."
                    .to_string(),
            ),
        }
    }

    async fn handle_tool_call(&self, id: Value, params: Value) -> JsonRpcResponse {
        let params: CallToolParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid tool call params: {}", e)),
                )
            }
        };

        let tool = match self.registry.get(&params.name) {
            Some(tool) => tool,
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)),
                )
            }
        };

        info!(tool = %params.name, "executing tool");

        match tool.execute(params.arguments).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                error!(tool = %params.name, error = %e, "tool execution failed");
                JsonRpcResponse::success(id, CallToolResult::error(e.to_string()))
            }
        }
    }

    fn handle_get_prompt(&self, id: Value, params: Value) -> JsonRpcResponse {
        let params: GetPromptParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid prompt params: {}", e)),
                )
            }
        };

        match prompts::get_prompt(&params.name, &params.arguments) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::invalid_params(e)),
        }
    }

    async fn handle_read_resource(&self, id: Value, params: Value) -> JsonRpcResponse {
        let params: ReadResourceParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid resource params: {}", e)),
                )
            }
        };

        match resources::read_resource(&params.uri, &self.client).await {
            Ok(contents) => JsonRpcResponse::success(
                id,
                ReadResourceResult {
                    contents: vec![contents],
                },
            ),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::default_registry;

    fn test_server() -> McpServer {
        let client = Arc::new(
            FlowiseClient::builder()
                .base_url("http://localhost:3000")
                .api_key("fk-test")
                .build()
                .unwrap(),
        );
        McpServer::new(default_registry(client.clone()), client)
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = test_server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "flowise-mcp");
        assert!(result["capabilities"]["tools"].is_object());
        assert!(result["capabilities"]["prompts"].is_object());
        assert!(result["capabilities"]["resources"].is_object());
    }

    #[tokio::test]
    async fn test_initialized_notification_has_no_response() {
        let server = test_server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_tools_list() {
        let server = test_server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();

        let tools = response.result.unwrap()["tools"].as_array().unwrap().len();
        assert_eq!(tools, 18);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = test_server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":3,"method":"does/not/exist"}"#)
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let server = test_server();
        let response = server
            .handle_message(
                r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"nope"}}"#,
            )
            .await
            .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert!(error.message.contains("nope"));
    }

    #[tokio::test]
    async fn test_parse_error() {
        let server = test_server();
        let response = server.handle_message("not json at all").await.unwrap();
        assert_eq!(response.error.unwrap().code, -32700);
        assert_eq!(response.id, Value::Null);
    }

    #[tokio::test]
    async fn test_ping() {
        let server = test_server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":5,"method":"ping"}"#)
            .await
            .unwrap();
        assert!(response.result.is_some());
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_prompts_list_and_get() {
        let server = test_server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":6,"method":"prompts/list"}"#)
            .await
            .unwrap();
        assert_eq!(
            response.result.unwrap()["prompts"].as_array().unwrap().len(),
            2
        );

        let response = server
            .handle_message(
                r#"{"jsonrpc":"2.0","id":7,"method":"prompts/get","params":{"name":"analyze_agentflow","arguments":{"flow_id":"f1"}}}"#,
            )
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["messages"][0]["role"], "user");
        assert!(result["messages"][0]["content"]["text"]
            .as_str()
            .unwrap()
            .contains("f1"));
    }

    #[tokio::test]
    async fn test_resources_list() {
        let server = test_server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":8,"method":"resources/list"}"#)
            .await
            .unwrap();
        let resources = response.result.unwrap()["resources"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(resources, 2);
    }

    #[tokio::test]
    async fn test_tool_call_validation_error_is_result_not_protocol_error() {
        let server = test_server();
        // Missing required flow_id: the tool reports a validation failure
        // as a tool result, not a JSON-RPC error.
        let response = server
            .handle_message(
                r#"{"jsonrpc":"2.0","id":9,"method":"tools/call","params":{"name":"flowise_get_flow","arguments":{}}}"#,
            )
            .await
            .unwrap();
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
    }
}
