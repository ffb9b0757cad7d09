// Flow analysis tool

use crate::analysis::analyze_flow;
use crate::format::{format_analysis, ResponseFormat};
use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use crate::tools::{
    json_schema_object, json_schema_response_format, json_schema_string, parse_args, Tool,
};
use anyhow::Result;
use flowise_client::FlowiseClient;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Tool to analyze a flow configuration and suggest improvements.
///
/// Fetches the flow, then runs a fixed local rule list over its nodes
/// and edges. The only tool with non-trivial local logic.
pub struct AnalyzeFlowTool {
    client: Arc<FlowiseClient>,
}

impl AnalyzeFlowTool {
    pub fn new(client: Arc<FlowiseClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeFlowArgs {
    flow_id: String,
    #[serde(default)]
    improvement_goal: Option<String>,
    #[serde(default)]
    response_format: ResponseFormat,
}

#[async_trait::async_trait]
impl Tool for AnalyzeFlowTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "flowise_analyze_flow".to_string(),
            description: "Analyze a chatflow or agentflow and provide improvement \
                          suggestions: structure overview, identified gaps, prioritized \
                          recommendations, and specific nodes to add. Use this to answer \
                          questions like 'How can I improve this flow to do X?'."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "flow_id": json_schema_string("The chatflow or agentflow ID to analyze"),
                    "improvement_goal": json_schema_string("Specific goal for improvement (e.g. 'better accuracy', 'faster responses')"),
                    "response_format": json_schema_response_format()
                }),
                vec!["flow_id"],
            ),
            annotations: Some(ToolAnnotations::read_only(
                "Analyze Flow and Suggest Improvements",
            )),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: AnalyzeFlowArgs = match parse_args(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e)),
        };

        match self.client.flows().get(&args.flow_id).await {
            Ok(flow) => {
                let analysis = analyze_flow(&flow, args.improvement_goal.as_deref());
                Ok(CallToolResult::text(format_analysis(
                    &analysis,
                    args.response_format,
                )))
            }
            Err(e) => Ok(CallToolResult::error(e.user_message())),
        }
    }
}
