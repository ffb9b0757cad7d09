//! Flow analysis heuristics.
//!
//! A fixed rule list over a fetched flow configuration: categorize the
//! nodes, flag structural gaps, and emit improvement suggestions. Purely
//! local, no network calls.

use serde::Serialize;
use serde_json::Value;

/// Result of analyzing one flow.
#[derive(Debug, Clone, Serialize)]
pub struct FlowAnalysis {
    pub flow_name: String,
    pub flow_type: String,
    pub summary: String,
    pub nodes: Vec<NodeSummary>,
    pub suggestions: Vec<Suggestion>,
    pub best_practices: Vec<BestPractice>,
    pub potential_issues: Vec<String>,
}

/// One node of the flow with its inferred functional category.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub label: String,
    pub category: &'static str,
}

/// An improvement suggestion with priority ordering.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub priority: Priority,
    pub category: &'static str,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tips: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes_to_add: Vec<String>,
}

/// A best-practice reminder attached to the analysis.
#[derive(Debug, Clone, Serialize)]
pub struct BestPractice {
    pub category: &'static str,
    pub title: String,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// Keyword table mapping node type names to functional categories.
/// First match wins.
const CATEGORY_KEYWORDS: &[(&[&str], &str)] = &[
    (
        &["llm", "gpt", "claude", "anthropic", "openai", "gemini", "mistral"],
        "llm",
    ),
    (&["memory", "buffer", "window"], "memory"),
    (
        &["vector", "chroma", "pinecone", "faiss", "weaviate", "qdrant", "milvus"],
        "vector_store",
    ),
    (&["retriever", "retrieval"], "retriever"),
    (&["loader", "document", "pdf", "csv"], "document_loader"),
    (&["embed", "embedding"], "embeddings"),
    (&["tool", "serp", "calculator", "request", "browser"], "tool"),
    (&["prompt", "template"], "prompt"),
    (&["agent", "supervisor", "worker"], "agent"),
    (&["chain", "sequential"], "chain"),
    (&["splitter", "chunk"], "text_splitter"),
    (&["moderation"], "moderation"),
    (&["cache"], "cache"),
    (
        &["condition", "ifelse", "if else", "fallback", "error"],
        "error_handling",
    ),
    (&["parser", "output"], "output_parser"),
];

/// Categorize a node type into a functional category.
pub fn categorize_node(node_type: &str) -> &'static str {
    let node_lower = node_type.to_lowercase();
    for (keywords, category) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| node_lower.contains(kw)) {
            return category;
        }
    }
    "other"
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// Parse a flow's `flowData`, which arrives either as a JSON string or
/// as an already-decoded object.
pub fn parse_flow_data(flow: &Value) -> Option<Value> {
    match flow.get("flowData") {
        Some(Value::String(raw)) => serde_json::from_str(raw).ok(),
        Some(obj @ Value::Object(_)) => Some(obj.clone()),
        _ => None,
    }
}

/// Analyze a flow configuration and generate improvement suggestions.
pub fn analyze_flow(flow: &Value, improvement_goal: Option<&str>) -> FlowAnalysis {
    let flow_type = str_field(flow, "type").unwrap_or("CHATFLOW").to_string();
    let mut analysis = FlowAnalysis {
        flow_name: str_field(flow, "name").unwrap_or("Unknown").to_string(),
        flow_type: flow_type.clone(),
        summary: String::new(),
        nodes: Vec::new(),
        suggestions: Vec::new(),
        best_practices: Vec::new(),
        potential_issues: Vec::new(),
    };

    let flow_data = match parse_flow_data(flow) {
        Some(data) => data,
        None => {
            analysis
                .potential_issues
                .push("Could not parse flow data - flow may be corrupted".to_string());
            return analysis;
        }
    };

    let empty = Vec::new();
    let nodes = flow_data
        .get("nodes")
        .and_then(Value::as_array)
        .unwrap_or(&empty);
    let edges = flow_data
        .get("edges")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    let mut categories_found: Vec<&'static str> = Vec::new();
    for node in nodes {
        let node_data = node.get("data").cloned().unwrap_or(Value::Null);
        let node_type = str_field(&node_data, "type")
            .or_else(|| str_field(&node_data, "name"))
            .unwrap_or("Unknown")
            .to_string();
        let label = str_field(&node_data, "label")
            .or_else(|| str_field(node, "id"))
            .unwrap_or("Unnamed")
            .to_string();

        let category = categorize_node(&node_type);
        if !categories_found.contains(&category) {
            categories_found.push(category);
        }

        analysis.nodes.push(NodeSummary {
            id: str_field(node, "id").unwrap_or_default().to_string(),
            node_type,
            label,
            category,
        });
    }

    analysis.summary = format!(
        "Flow contains {} nodes and {} connections.",
        nodes.len(),
        edges.len()
    );

    let is_agent_flow = flow_type == "AGENTFLOW" || flow_type == "MULTIAGENT";
    let goal_lower = improvement_goal.unwrap_or("").to_lowercase();
    let has = |cat: &str| categories_found.contains(&cat);

    if !has("memory") {
        analysis.suggestions.push(Suggestion {
            priority: Priority::High,
            category: "memory",
            title: "Add Conversation Memory".to_string(),
            description: "This flow doesn't have memory nodes. Adding memory enables \
                          conversation context across messages."
                .to_string(),
            tips: Vec::new(),
            nodes_to_add: string_vec(&["Buffer Memory", "Zep Memory", "Redis Memory", "MongoDB Memory"]),
        });
    }

    if !has("error_handling") {
        analysis.suggestions.push(Suggestion {
            priority: Priority::High,
            category: "reliability",
            title: "Add Error Handling Branches".to_string(),
            description: "This flow has no error handling branches. Without condition or \
                          fallback nodes a single failing step fails the whole flow."
                .to_string(),
            tips: Vec::new(),
            nodes_to_add: string_vec(&["Condition", "If Else", "Fallback"]),
        });
    }

    if goal_lower.contains("knowledge") && !has("vector_store") {
        let mut nodes_to_add = string_vec(&["Chroma", "Pinecone", "FAISS", "OpenAI Embeddings"]);
        if !has("document_loader") {
            nodes_to_add.extend(string_vec(&["PDF Loader", "Text Loader"]));
        }
        if !has("retriever") {
            nodes_to_add.push("Vector Store Retriever".to_string());
        }
        analysis.suggestions.push(Suggestion {
            priority: Priority::High,
            category: "rag",
            title: "Add Vector Store for Knowledge Base".to_string(),
            description: "Add a Vector Store (Pinecone, Chroma, or FAISS) with Embeddings \
                          and Document Loaders for knowledge retrieval."
                .to_string(),
            tips: Vec::new(),
            nodes_to_add,
        });
    }

    if is_agent_flow && !has("tool") {
        analysis.suggestions.push(Suggestion {
            priority: Priority::Medium,
            category: "tools",
            title: "Add Tools to Agent".to_string(),
            description: "This agent flow has no tools. Add tools to extend capabilities \
                          (Search, Calculator, API calls)."
                .to_string(),
            tips: Vec::new(),
            nodes_to_add: string_vec(&["SerpAPI", "Calculator", "Custom Tool", "Request Tool", "Web Browser"]),
        });
    }

    if goal_lower.contains("format") && !has("output_parser") {
        analysis.suggestions.push(Suggestion {
            priority: Priority::Medium,
            category: "output",
            title: "Add Output Parser".to_string(),
            description: "Add an Output Parser to structure responses (JSON, CSV, \
                          structured data)."
                .to_string(),
            tips: Vec::new(),
            nodes_to_add: string_vec(&[
                "Structured Output Parser",
                "JSON Output Parser",
                "List Output Parser",
            ]),
        });
    }

    if flow.get("isPublic").and_then(Value::as_bool).unwrap_or(false) && !has("moderation") {
        analysis.suggestions.push(Suggestion {
            priority: Priority::Medium,
            category: "safety",
            title: "Add Input Moderation".to_string(),
            description: "This public flow lacks moderation. Add an Input Moderation node \
                          to filter inappropriate content."
                .to_string(),
            tips: Vec::new(),
            nodes_to_add: string_vec(&["OpenAI Moderation", "Simple Prompt Moderation"]),
        });
    }

    if goal_lower.contains("accuracy") || goal_lower.contains("better") {
        analysis.suggestions.push(Suggestion {
            priority: Priority::High,
            category: "accuracy",
            title: "Improve Response Accuracy".to_string(),
            description: "To improve accuracy:".to_string(),
            tips: string_vec(&[
                "Use a more capable model (GPT-4o, Claude 3.5 Sonnet)",
                "Add relevant context through RAG",
                "Improve prompts with clearer instructions",
                "Add few-shot examples",
                "Adjust temperature (lower for consistency, higher for creativity)",
            ]),
            nodes_to_add: Vec::new(),
        });
    }

    if goal_lower.contains("fast") || goal_lower.contains("speed") {
        analysis.suggestions.push(Suggestion {
            priority: Priority::High,
            category: "performance",
            title: "Improve Response Speed".to_string(),
            description: "To make responses faster:".to_string(),
            tips: string_vec(&[
                "Use a faster model (GPT-4o-mini, Claude 3 Haiku)",
                "Enable streaming for perceived faster responses",
                "Add caching for repeated queries",
                "Reduce context length where possible",
                "Use smaller chunk sizes in RAG",
            ]),
            nodes_to_add: Vec::new(),
        });
    }

    if goal_lower.contains("handle") || goal_lower.contains("support") {
        analysis.suggestions.push(Suggestion {
            priority: Priority::Medium,
            category: "capability",
            title: "Extend Capabilities".to_string(),
            description: format!(
                "Based on your goal '{}':",
                improvement_goal.unwrap_or_default()
            ),
            tips: string_vec(&[
                "Add specific tools for the functionality needed",
                "Create custom tools using the Custom Tool node",
                "Add relevant document sources via Document Loaders",
                "Consider using Agent flows for complex multi-step tasks",
                "Add conditional routing with Condition nodes",
            ]),
            nodes_to_add: Vec::new(),
        });
    }

    if has("prompt") {
        analysis.best_practices.push(BestPractice {
            category: "prompts",
            title: "Prompt Engineering Tips".to_string(),
            tips: string_vec(&[
                "Use clear, specific instructions in your prompts",
                "Include examples (few-shot learning) for better results",
                "Define the output format explicitly",
                "Use system prompts to set context and behavior",
            ]),
        });
    }

    if !has("cache") {
        analysis.best_practices.push(BestPractice {
            category: "performance",
            title: "Consider Adding Caching".to_string(),
            tips: string_vec(&[
                "Add a Cache node to store repeated LLM responses",
                "Caching reduces costs and latency significantly",
                "Redis Cache or In-Memory Cache are good options",
            ]),
        });
    }

    analysis
}

fn string_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flow_with_nodes(node_types: &[&str]) -> Value {
        let nodes: Vec<Value> = node_types
            .iter()
            .enumerate()
            .map(|(i, t)| {
                json!({
                    "id": format!("node-{}", i),
                    "data": {"type": t, "label": t}
                })
            })
            .collect();
        json!({
            "id": "flow-1",
            "name": "Test Flow",
            "type": "CHATFLOW",
            "flowData": serde_json::to_string(&json!({"nodes": nodes, "edges": []})).unwrap()
        })
    }

    #[test]
    fn test_categorize_llm_nodes() {
        assert_eq!(categorize_node("ChatOpenAI"), "llm");
        assert_eq!(categorize_node("GPT-4"), "llm");
        assert_eq!(categorize_node("Claude"), "llm");
        assert_eq!(categorize_node("AnthropicChat"), "llm");
    }

    #[test]
    fn test_categorize_memory_nodes() {
        assert_eq!(categorize_node("BufferMemory"), "memory");
        assert_eq!(categorize_node("WindowMemory"), "memory");
    }

    #[test]
    fn test_categorize_vector_store_nodes() {
        assert_eq!(categorize_node("Chroma"), "vector_store");
        assert_eq!(categorize_node("Pinecone"), "vector_store");
        assert_eq!(categorize_node("FAISS"), "vector_store");
    }

    #[test]
    fn test_categorize_tool_nodes() {
        assert_eq!(categorize_node("SerpAPI"), "tool");
        assert_eq!(categorize_node("Calculator"), "tool");
    }

    #[test]
    fn test_categorize_error_handling_nodes() {
        assert_eq!(categorize_node("ConditionNode"), "error_handling");
        assert_eq!(categorize_node("IfElse"), "error_handling");
        assert_eq!(categorize_node("FallbackChain"), "error_handling");
    }

    #[test]
    fn test_categorize_unknown_nodes() {
        assert_eq!(categorize_node("SomeRandomNode"), "other");
    }

    #[test]
    fn test_summary_counts_nodes_and_edges() {
        let analysis = analyze_flow(&flow_with_nodes(&["ChatOpenAI", "BufferMemory"]), None);
        assert_eq!(analysis.summary, "Flow contains 2 nodes and 0 connections.");
        assert_eq!(analysis.nodes.len(), 2);
    }

    #[test]
    fn test_missing_memory_suggested() {
        let analysis = analyze_flow(&flow_with_nodes(&["ChatOpenAI"]), None);
        assert!(analysis
            .suggestions
            .iter()
            .any(|s| s.category == "memory" && s.priority == Priority::High));
    }

    #[test]
    fn test_missing_error_handling_suggested() {
        let analysis = analyze_flow(&flow_with_nodes(&["ChatOpenAI", "BufferMemory"]), None);
        let suggestion = analysis
            .suggestions
            .iter()
            .find(|s| s.category == "reliability")
            .expect("expected a reliability suggestion");
        assert!(suggestion.description.to_lowercase().contains("error handling"));
    }

    #[test]
    fn test_error_handling_present_not_flagged() {
        let analysis =
            analyze_flow(&flow_with_nodes(&["ChatOpenAI", "ConditionNode"]), None);
        assert!(!analysis.suggestions.iter().any(|s| s.category == "reliability"));
    }

    #[test]
    fn test_agent_flow_without_tools_flagged() {
        let mut flow = flow_with_nodes(&["SupervisorAgent"]);
        flow["type"] = json!("AGENTFLOW");
        let analysis = analyze_flow(&flow, None);
        assert!(analysis.suggestions.iter().any(|s| s.category == "tools"));
    }

    #[test]
    fn test_knowledge_goal_suggests_vector_store() {
        let analysis =
            analyze_flow(&flow_with_nodes(&["ChatOpenAI"]), Some("add a knowledge base"));
        let suggestion = analysis
            .suggestions
            .iter()
            .find(|s| s.category == "rag")
            .expect("expected a rag suggestion");
        assert!(suggestion.nodes_to_add.contains(&"PDF Loader".to_string()));
    }

    #[test]
    fn test_public_flow_without_moderation_flagged() {
        let mut flow = flow_with_nodes(&["ChatOpenAI"]);
        flow["isPublic"] = json!(true);
        let analysis = analyze_flow(&flow, None);
        assert!(analysis.suggestions.iter().any(|s| s.category == "safety"));
    }

    #[test]
    fn test_speed_goal_adds_performance_suggestion() {
        let analysis = analyze_flow(&flow_with_nodes(&["ChatOpenAI"]), Some("faster responses"));
        assert!(analysis
            .suggestions
            .iter()
            .any(|s| s.category == "performance" && s.priority == Priority::High));
    }

    #[test]
    fn test_corrupted_flow_data_reported_as_issue() {
        let flow = json!({"name": "Broken", "flowData": "{not json"});
        let analysis = analyze_flow(&flow, None);
        assert_eq!(analysis.potential_issues.len(), 1);
        assert!(analysis.potential_issues[0].contains("Could not parse"));
        assert!(analysis.nodes.is_empty());
    }

    #[test]
    fn test_flow_data_as_object_accepted() {
        let flow = json!({
            "name": "Inline",
            "flowData": {"nodes": [{"id": "a", "data": {"type": "ChatOpenAI", "label": "LLM"}}], "edges": []}
        });
        let analysis = analyze_flow(&flow, None);
        assert_eq!(analysis.nodes.len(), 1);
        assert_eq!(analysis.nodes[0].category, "llm");
    }
}
