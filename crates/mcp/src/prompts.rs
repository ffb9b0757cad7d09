//! MCP prompt templates.

use crate::protocol::{GetPromptResult, PromptArgument, PromptMessage, PromptSchema};
use serde_json::Value;

/// List the prompts this server offers.
pub fn list_prompts() -> Vec<PromptSchema> {
    vec![
        PromptSchema {
            name: "analyze_agentflow".to_string(),
            description: "Analyze an agentflow and suggest improvements".to_string(),
            arguments: vec![
                PromptArgument {
                    name: "flow_id".to_string(),
                    description: "The flow to analyze".to_string(),
                    required: true,
                },
                PromptArgument {
                    name: "goal".to_string(),
                    description: "Optional improvement goal".to_string(),
                    required: false,
                },
            ],
        },
        PromptSchema {
            name: "improve_chatbot".to_string(),
            description: "Improve a chatbot based on a specific issue".to_string(),
            arguments: vec![
                PromptArgument {
                    name: "flow_id".to_string(),
                    description: "The chatbot flow to improve".to_string(),
                    required: true,
                },
                PromptArgument {
                    name: "issue".to_string(),
                    description: "The issue being experienced".to_string(),
                    required: true,
                },
            ],
        },
    ]
}

fn argument<'a>(arguments: &'a Value, key: &str) -> Option<&'a str> {
    arguments.get(key).and_then(Value::as_str)
}

/// Render a prompt by name.
pub fn get_prompt(name: &str, arguments: &Value) -> Result<GetPromptResult, String> {
    match name {
        "analyze_agentflow" => {
            let flow_id =
                argument(arguments, "flow_id").ok_or("Missing required argument: flow_id")?;
            let goal_text = match argument(arguments, "goal") {
                Some(goal) if !goal.is_empty() => format!("\n\nSpecific goal: {}", goal),
                _ => String::new(),
            };
            let text = format!(
                "Please analyze the Flowise agentflow with ID: {}{}\n\n\
                 Steps to follow:\n\
                 1. First, use flowise_get_flow to retrieve the full flow configuration\n\
                 2. Then, use flowise_analyze_flow with the flow_id to get improvement suggestions\n\
                 3. Based on the analysis, provide specific, actionable recommendations\n\n\
                 Consider:\n\
                 - Current nodes and their connections\n\
                 - Missing components (memory, tools, retrieval)\n\
                 - Performance optimization opportunities\n\
                 - Best practices for the flow type\n\
                 - The specific goal if provided",
                flow_id, goal_text
            );
            Ok(GetPromptResult {
                description: Some("Analyze an agentflow and suggest improvements".to_string()),
                messages: vec![PromptMessage::user(text)],
            })
        }
        "improve_chatbot" => {
            let flow_id =
                argument(arguments, "flow_id").ok_or("Missing required argument: flow_id")?;
            let issue = argument(arguments, "issue").ok_or("Missing required argument: issue")?;
            let text = format!(
                "Help me improve my Flowise chatbot (flow ID: {}).\n\n\
                 Issue I'm experiencing: {}\n\n\
                 Please:\n\
                 1. Use flowise_get_flow to examine the current configuration\n\
                 2. Use flowise_analyze_flow with improvement_goal set to address my issue\n\
                 3. Provide step-by-step recommendations\n\
                 4. Suggest specific nodes to add or configure",
                flow_id, issue
            );
            Ok(GetPromptResult {
                description: Some("Improve a chatbot based on a specific issue".to_string()),
                messages: vec![PromptMessage::user(text)],
            })
        }
        other => Err(format!("Unknown prompt: {}", other)),
    }
}
