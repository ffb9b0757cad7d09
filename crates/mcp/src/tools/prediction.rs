// Prediction tool (chatting with a flow)

use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use crate::tools::{
    json_schema_boolean, json_schema_map, json_schema_object, json_schema_string, parse_args, Tool,
};
use anyhow::Result;
use flowise_client::{FlowiseClient, PredictionRequest};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Tool to send a message to a flow and return its response.
pub struct PredictTool {
    client: Arc<FlowiseClient>,
}

impl PredictTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct PredictArgs {
    flow_id: String,
    question: String,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    streaming: bool,
    #[serde(default)]
    override_config: Option<Map<String, Value>>,
}

#[async_trait::async_trait]
impl Tool for PredictTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_predict".to_string(),
            description: "Send a message to a chatflow or agentflow and get the AI \
                          response. This is the primary tool for interacting with flows."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "flow_id": json_schema_string("The chatflow or agentflow ID to send the message to"),
                    "question": json_schema_string("The message/question to send to the flow"),
                    "session_id": json_schema_string("Optional session ID for maintaining conversation context"),
                    "streaming": json_schema_boolean("Whether to request streaming responses (not recommended for MCP)"),
                    "override_config": json_schema_map("Optional configuration overrides (e.g. temperature, maxTokens)")
                }),
                vec!["flow_id", "question"],
            ),
            annotations: Some(ToolAnnotations::mutating("Send Message to Flowise Flow")),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: PredictArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        let request = PredictionRequest::new(
            args.question,
            args.session_id,
            args.streaming,
            args.override_config,
        );

        match self.client.predictions().predict(&args.flow_id, &request).await {
            Ok(response) => Ok(CallToolResult::text(extract_answer(&response))),
            Err(e) => Ok(CallToolResult::error(e.user_message())),
        }
    }
}

/// Pull the answer out of a prediction response: prefer the `text`
/// field, then a pretty-printed `json` field, else the whole body.
fn extract_answer(response: &Value) -> String {
    if let Some(text) = response.get("text").and_then(Value::as_str) {
        return text.to_string();
    }
    if let Some(json) = response.get("json") {
        return serde_json::to_string_pretty(json).unwrap_or_default();
    }
    match response {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_answer_prefers_text() {
        let response = json!({"text": "hello", "json": {"ignored": true}});
        assert_eq!(extract_answer(&response), "hello");
    }

    #[test]
    fn test_extract_answer_falls_back_to_json_field() {
        let response = json!({"json": {"answer": 42}});
        let extracted = extract_answer(&response);
        assert!(extracted.contains("\"answer\": 42"));
    }

    #[test]
    fn test_extract_answer_plain_string() {
        let response = json!("raw body");
        assert_eq!(extract_answer(&response), "raw body");
    }

    #[test]
    fn test_extract_answer_whole_body() {
        let response = json!({"something": "else"});
        assert!(extract_answer(&response).contains("something"));
    }
}
