// Document store tools

use crate::format::ResponseFormat;
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

/// Tool to list document stores used for RAG.
pub struct ListDocumentStoresTool {
    client: Arc<FlowiseClient>,
}

impl ListDocumentStoresTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ListDocumentStoresArgs {
    #[serde(default)]
    response_format: ResponseFormat,
}

#[async_trait::async_trait]
impl Tool for ListDocumentStoresTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_list_document_stores".to_string(),
            description: "List all document stores configured in Flowise. Document stores \
                          contain indexed documents for retrieval-augmented generation."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "response_format": json_schema_response_format()
                }),
                vec![],
            ),
            annotations: Some(ToolAnnotations::read_only("List Document Stores")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: ListDocumentStoresArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        let stores = match self.client.document_stores().list().await {
            Ok(response) => response,
            Err(e) => return Ok(CallToolResult::error(e.user_message())),
        };

        if args.response_format == ResponseFormat::Json {
            return Ok(CallToolResult::text(serde_json::to_string_pretty(&stores)?));
        }

        let list = stores.as_array().cloned().unwrap_or_default();
        if list.is_empty() {
            return Ok(CallToolResult::text("No document stores configured."));
        }

        let mut lines = vec!["# Document Stores\n".to_string()];
        for store in &list {
            lines.push(format!(
                "## {}",
                store.get("name").and_then(Value::as_str).unwrap_or("Unnamed")
            ));
            lines.push(format!("- **ID**: `{}`", str_field(store, "id")));
            lines.push(format!("- **Status**: {}", str_field(store, "status")));
            if let Some(description) = store.get("description").and_then(Value::as_str) {
                lines.push(format!("- **Description**: {}", description));
            }
            lines.push(format!("- **Updated**: {}", str_field(store, "updatedDate")));
            lines.push(String::new());
        }

        Ok(CallToolResult::text(lines.join("\n")))
    }
}

/// Tool to get one document store's details.
pub struct GetDocumentStoreTool {
    client: Arc<FlowiseClient>,
}

impl GetDocumentStoreTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetDocumentStoreArgs {
    store_id: String,
    #[serde(default)]
    response_format: ResponseFormat,
}

#[async_trait::async_trait]
impl Tool for GetDocumentStoreTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_get_document_store".to_string(),
            description: "Get detailed information about a specific document store, \
                          including its document loaders."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "store_id": json_schema_string("The unique identifier of the document store"),
                    "response_format": json_schema_response_format()
                }),
                vec!["store_id"],
            ),
            annotations: Some(ToolAnnotations::read_only("Get Document Store Details")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: GetDocumentStoreArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        let store = match self.client.document_stores().get(&args.store_id).await {
            Ok(response) => response,
            Err(e) => return Ok(CallToolResult::error(e.user_message())),
        };

        if args.response_format == ResponseFormat::Json {
            return Ok(CallToolResult::text(serde_json::to_string_pretty(&store)?));
        }

        let mut lines = vec![
            format!(
                "# Document Store: {}",
                store.get("name").and_then(Value::as_str).unwrap_or("Unnamed")
            ),
            String::new(),
            format!("**ID**: `{}`", str_field(&store, "id")),
            format!("**Status**: {}", str_field(&store, "status")),
            format!("**Created**: {}", str_field(&store, "createdDate")),
            format!("**Updated**: {}", str_field(&store, "updatedDate")),
        ];

        if let Some(description) = store.get("description").and_then(Value::as_str) {
            lines.push(format!("**Description**: {}", description));
        }

        if let Some(loaders) = store.get("loaders").and_then(Value::as_array) {
            if !loaders.is_empty() {
                lines.push(String::new());
                lines.push("## Document Loaders".to_string());
                for loader in loaders {
                    lines.push(format!(
                        "- **{}**: {}",
                        loader.get("loaderName").and_then(Value::as_str).unwrap_or("Unknown"),
                        str_field(loader, "status"),
                    ));
                }
            }
        }

        Ok(CallToolResult::text(lines.join("\n")))
    }
}
