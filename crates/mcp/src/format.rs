//! Markdown and JSON renderers for tool output.

use crate::analysis::{parse_flow_data, FlowAnalysis, Priority};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Output format for tool responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Markdown,
    Json,
}

/// Truncate a string to at most `max` characters, appending an ellipsis
/// marker when content was cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("N/A")
}

fn bool_field(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn simplify_flow(flow: &Value) -> Value {
    serde_json::json!({
        "id": flow.get("id"),
        "name": flow.get("name"),
        "type": flow.get("type").and_then(Value::as_str).unwrap_or("CHATFLOW"),
        "deployed": bool_field(flow, "deployed"),
        "isPublic": bool_field(flow, "isPublic"),
        "category": flow.get("category"),
        "updatedDate": flow.get("updatedDate"),
    })
}

/// Render a flow listing.
pub fn format_flow_list(flows: &[Value], format: ResponseFormat) -> String {
    let simplified: Vec<Value> = flows.iter().map(simplify_flow).collect();

    if format == ResponseFormat::Json {
        return serde_json::to_string_pretty(&simplified).unwrap_or_default();
    }

    if flows.is_empty() {
        return "No flows found.".to_string();
    }

    let mut lines = vec!["# Flowise Flows\n".to_string()];
    for flow in &simplified {
        let flow_type = str_field(flow, "type");
        let type_indicator = if flow_type == "AGENTFLOW" || flow_type == "MULTIAGENT" {
            "[AGENT]"
        } else {
            "[CHAT]"
        };
        let deployed = if bool_field(flow, "deployed") { "[YES]" } else { "[NO]" };
        let public = if bool_field(flow, "isPublic") { "[PUBLIC]" } else { "[PRIVATE]" };

        lines.push(format!(
            "## {} {}",
            type_indicator,
            flow.get("name").and_then(Value::as_str).unwrap_or("Unnamed")
        ));
        lines.push(format!("- **ID**: `{}`", str_field(flow, "id")));
        lines.push(format!("- **Type**: {}", flow_type));
        lines.push(format!("- **Deployed**: {}", deployed));
        lines.push(format!("- **Public**: {}", public));
        if let Some(category) = flow.get("category").and_then(Value::as_str) {
            lines.push(format!("- **Categories**: {}", category));
        }
        lines.push(format!("- **Updated**: {}", str_field(flow, "updatedDate")));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Render detailed information about one flow, including a node summary
/// parsed from its `flowData`.
pub fn format_flow_detail(flow: &Value, format: ResponseFormat) -> String {
    let flow_type = flow.get("type").and_then(Value::as_str).unwrap_or("CHATFLOW");
    let type_indicator = if flow_type == "AGENTFLOW" || flow_type == "MULTIAGENT" {
        "[AGENT]"
    } else {
        "[CHAT]"
    };

    let mut nodes_summary: Vec<Value> = Vec::new();
    if let Some(flow_data) = parse_flow_data(flow) {
        for node in flow_data.get("nodes").and_then(Value::as_array).unwrap_or(&Vec::new()) {
            let data = node.get("data").cloned().unwrap_or(Value::Null);
            nodes_summary.push(serde_json::json!({
                "id": node.get("id"),
                "type": data.get("type").or_else(|| node.get("type")).and_then(Value::as_str).unwrap_or("Unknown"),
                "label": data.get("label").or_else(|| data.get("name")).and_then(Value::as_str).unwrap_or("Unnamed"),
            }));
        }
    }

    if format == ResponseFormat::Json {
        let simplified = serde_json::json!({
            "id": flow.get("id"),
            "name": flow.get("name"),
            "type": flow_type,
            "deployed": bool_field(flow, "deployed"),
            "isPublic": bool_field(flow, "isPublic"),
            "category": flow.get("category"),
            "createdDate": flow.get("createdDate"),
            "updatedDate": flow.get("updatedDate"),
            "nodes": nodes_summary,
        });
        return serde_json::to_string_pretty(&simplified).unwrap_or_default();
    }

    let mut lines = vec![
        format!(
            "# {} {}",
            type_indicator,
            flow.get("name").and_then(Value::as_str).unwrap_or("Unnamed")
        ),
        String::new(),
        format!("**ID**: `{}`", str_field(flow, "id")),
        format!("**Type**: {}", flow_type),
        format!(
            "**Deployed**: {}",
            if bool_field(flow, "deployed") { "Yes" } else { "No" }
        ),
        format!(
            "**Public**: {}",
            if bool_field(flow, "isPublic") { "Yes" } else { "No" }
        ),
        format!("**Created**: {}", str_field(flow, "createdDate")),
        format!("**Updated**: {}", str_field(flow, "updatedDate")),
    ];

    if let Some(category) = flow.get("category").and_then(Value::as_str) {
        lines.push(format!("**Categories**: {}", category));
    }

    if !nodes_summary.is_empty() {
        lines.push(String::new());
        lines.push("## Nodes".to_string());
        for node in &nodes_summary {
            lines.push(format!(
                "- **{}** ({})",
                str_field(node, "label"),
                str_field(node, "type")
            ));
        }
    }

    lines.join("\n")
}

/// Render a flow analysis report.
pub fn format_analysis(analysis: &FlowAnalysis, format: ResponseFormat) -> String {
    if format == ResponseFormat::Json {
        return serde_json::to_string_pretty(analysis).unwrap_or_default();
    }

    let mut lines = vec![
        format!("# Flow Analysis: {}", analysis.flow_name),
        String::new(),
        format!("**Type**: {}", analysis.flow_type),
        format!("**Summary**: {}", analysis.summary),
        String::new(),
    ];

    if !analysis.nodes.is_empty() {
        lines.push("## Nodes Overview".to_string());
        let mut categories: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for node in &analysis.nodes {
            categories
                .entry(node.category)
                .or_default()
                .push(format!("{} ({})", node.label, node.node_type));
        }
        for (category, nodes) in &categories {
            lines.push(format!("### {}", title_case(category)));
            for node in nodes {
                lines.push(format!("- {}", node));
            }
        }
        lines.push(String::new());
    }

    if !analysis.potential_issues.is_empty() {
        lines.push("## [!] Potential Issues".to_string());
        for issue in &analysis.potential_issues {
            lines.push(format!("- {}", issue));
        }
        lines.push(String::new());
    }

    if !analysis.suggestions.is_empty() {
        lines.push("## Improvement Suggestions".to_string());
        let mut suggestions: Vec<_> = analysis.suggestions.iter().collect();
        suggestions.sort_by_key(|s| s.priority);
        for suggestion in suggestions {
            let priority_indicator = match suggestion.priority {
                Priority::High => "[HIGH]",
                Priority::Medium => "[MEDIUM]",
            };
            lines.push(format!("### {} {}", priority_indicator, suggestion.title));
            lines.push(format!("**Category**: {}", suggestion.category));
            lines.push(format!("\n{}", suggestion.description));

            if !suggestion.tips.is_empty() {
                lines.push("\n**Recommendations:**".to_string());
                for tip in &suggestion.tips {
                    lines.push(format!("- {}", tip));
                }
            }

            if !suggestion.nodes_to_add.is_empty() {
                lines.push(format!(
                    "\n**Suggested nodes**: {}",
                    suggestion.nodes_to_add.join(", ")
                ));
            }
            lines.push(String::new());
        }
    }

    if !analysis.best_practices.is_empty() {
        lines.push("## Best Practices".to_string());
        for practice in &analysis.best_practices {
            lines.push(format!("### {}", practice.title));
            for tip in &practice.tips {
                lines.push(format!("- {}", tip));
            }
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn title_case(category: &str) -> String {
    category
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
