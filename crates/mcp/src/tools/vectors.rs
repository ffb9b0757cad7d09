// Vector store tools

use crate::format::truncate;
use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use crate::tools::{json_schema_map, json_schema_object, json_schema_string, parse_args, Tool};
use anyhow::Result;
use flowise_client::{FlowiseClient, UpsertVectorRequest, VectorQueryRequest};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Tool to trigger a flow's vector upsert pipeline.
pub struct UpsertVectorTool {
    client: Arc<FlowiseClient>,
}

impl UpsertVectorTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct UpsertVectorArgs {
    flow_id: String,
    #[serde(default)]
    stop_node_id: Option<String>,
    #[serde(default)]
    override_config: Option<Map<String, Value>>,
}

#[async_trait::async_trait]
impl Tool for UpsertVectorTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_upsert_vector".to_string(),
            description: "Insert or update vectors in a chatflow's vector store by \
                          triggering the flow's document processing pipeline."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "flow_id": json_schema_string("The chatflow ID containing the vector store"),
                    "stop_node_id": json_schema_string("Node ID when multiple vector stores exist in the flow"),
                    "override_config": json_schema_map("Optional configuration overrides for the upsert operation")
                }),
                vec!["flow_id"],
            ),
            annotations: Some(ToolAnnotations::mutating("Upsert Vectors to Flow")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: UpsertVectorArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        let request = UpsertVectorRequest {
            stop_node_id: args.stop_node_id,
            override_config: args.override_config,
        };

        match self.client.vectors().upsert(&args.flow_id, &request).await {
            Ok(response) => {
                let count = |key: &str| response.get(key).and_then(Value::as_u64).unwrap_or(0);
                Ok(CallToolResult::text(format!(
                    "Vector upsert completed for flow `{}`:\n\n\
                     - **Added**: {}\n\
                     - **Updated**: {}\n\
                     - **Deleted**: {}\n\
                     - **Skipped**: {}",
                    args.flow_id,
                    count("numAdded"),
                    count("numUpdated"),
                    count("numDeleted"),
                    count("numSkipped"),
                )))
            }
            Err(e) => Ok(CallToolResult::error(e.user_message())),
        }
    }
}

/// Tool to run a retrieval query against a document store's vector store.
pub struct QueryVectorStoreTool {
    client: Arc<FlowiseClient>,
}

impl QueryVectorStoreTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct QueryVectorStoreArgs {
    store_id: String,
    query: String,
}

#[async_trait::async_trait]
impl Tool for QueryVectorStoreTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_query_vector_store".to_string(),
            description: "Execute a retrieval query on a document store's vector store \
                          and return the matching documents."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "store_id": json_schema_string("The document store ID to query"),
                    "query": json_schema_string("The search query")
                }),
                vec!["store_id", "query"],
            ),
            annotations: Some(ToolAnnotations::read_only("Query Vector Store")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: QueryVectorStoreArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        let request = VectorQueryRequest {
            store_id: args.store_id,
            query: args.query.clone(),
        };

        let response = match self.client.vectors().query(&request).await {
            Ok(response) => response,
            Err(e) => return Ok(CallToolResult::error(e.user_message())),
        };

        if !response.is_object() {
            return Ok(CallToolResult::text(serde_json::to_string_pretty(
                &response,
            )?));
        }

        let time_taken = response
            .get("timeTaken")
            .map(|v| v.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let empty = Vec::new();
        let docs = response.get("docs").and_then(Value::as_array).unwrap_or(&empty);

        let mut lines = vec![
            "# Query Results".to_string(),
            String::new(),
            format!("**Query**: {}", args.query),
            format!("**Time**: {}ms", time_taken),
            format!("**Results**: {} documents", docs.len()),
            String::new(),
        ];

        for (i, doc) in docs.iter().take(10).enumerate() {
            let content = doc.get("pageContent").and_then(Value::as_str).unwrap_or("");
            lines.push(format!("## Document {}", i + 1));
            lines.push(truncate(content, 300));
            if let Some(source) = doc
                .get("metadata")
                .and_then(|m| m.get("source"))
                .and_then(Value::as_str)
            {
                lines.push(format!("*Source: {}*", source));
            }
            lines.push(String::new());
        }

        Ok(CallToolResult::text(lines.join("\n")))
    }
}
