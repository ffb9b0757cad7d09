pub mod admin;
pub mod analyze;
pub mod assistants;
pub mod chat;
pub mod document_stores;
pub mod flows;
pub mod prediction;
pub mod vectors;
mod registry;

pub use admin::{ListToolsTool, ListVariablesTool, PingTool};
pub use analyze::AnalyzeFlowTool;
pub use assistants::{GetAssistantTool, ListAssistantsTool};
pub use chat::{DeleteChatHistoryTool, GetChatHistoryTool};
pub use document_stores::{GetDocumentStoreTool, ListDocumentStoresTool};
pub use flows::{CreateFlowTool, DeleteFlowTool, GetFlowTool, ListFlowsTool, UpdateFlowTool};
pub use prediction::PredictTool;
pub use registry::{
    json_schema_boolean, json_schema_map, json_schema_number, json_schema_object,
    json_schema_response_format, json_schema_string, parse_args, Tool, ToolRegistry,
};
pub use vectors::{QueryVectorStoreTool, UpsertVectorTool};

use flowise_client::FlowiseClient;
use std::sync::Arc;

/// Build the full tool registry for a Flowise instance.
///
/// The registry is assembled once at process start; the tool surface is
/// fixed afterwards.
pub fn default_registry(client: Arc<FlowiseClient>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    // Flow CRUD
    registry.register(Arc::new(ListFlowsTool::new(client.clone())));
    registry.register(Arc::new(GetFlowTool::new(client.clone())));
    registry.register(Arc::new(CreateFlowTool::new(client.clone())));
    registry.register(Arc::new(UpdateFlowTool::new(client.clone())));
    registry.register(Arc::new(DeleteFlowTool::new(client.clone())));

    // Predictions and analysis
    registry.register(Arc::new(PredictTool::new(client.clone())));
    registry.register(Arc::new(AnalyzeFlowTool::new(client.clone())));

    // Assistants
    registry.register(Arc::new(ListAssistantsTool::new(client.clone())));
    registry.register(Arc::new(GetAssistantTool::new(client.clone())));

    // Document stores and vectors
    registry.register(Arc::new(ListDocumentStoresTool::new(client.clone())));
    registry.register(Arc::new(GetDocumentStoreTool::new(client.clone())));
    registry.register(Arc::new(UpsertVectorTool::new(client.clone())));
    registry.register(Arc::new(QueryVectorStoreTool::new(client.clone())));

    // Chat history
    registry.register(Arc::new(GetChatHistoryTool::new(client.clone())));
    registry.register(Arc::new(DeleteChatHistoryTool::new(client.clone())));

    // Instance administration
    registry.register(Arc::new(ListVariablesTool::new(client.clone())));
    registry.register(Arc::new(ListToolsTool::new(client.clone())));
    registry.register(Arc::new(PingTool::new(client)));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> Arc<FlowiseClient> {
        Arc::new(
            FlowiseClient::builder()
                .base_url("http://localhost:3000")
                .api_key("fk-test")
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_default_registry_contains_all_tools() {
        let registry = default_registry(test_client());

        for name in [
            "flowise_list_flows",
            "flowise_get_flow",
            "flowise_create_flow",
            "flowise_update_flow",
            "flowise_delete_flow",
            "flowise_predict",
            "flowise_analyze_flow",
            "flowise_list_assistants",
            "flowise_get_assistant",
            "flowise_list_document_stores",
            "flowise_get_document_store",
            "flowise_upsert_vector",
            "flowise_query_vector_store",
            "flowise_get_chat_history",
            "flowise_delete_chat_history",
            "flowise_list_variables",
            "flowise_list_tools",
            "flowise_ping",
        ] {
            assert!(registry.contains(name), "missing tool: {}", name);
        }
        assert_eq!(registry.len(), 18);
    }

    #[test]
    fn test_schemas_are_sorted_and_well_formed() {
        let registry = default_registry(test_client());
        let schemas = registry.list_schemas();

        let names: Vec<&str> = schemas.iter().map(|s| s.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        for schema in &schemas {
            assert_eq!(schema.input_schema["type"], "object");
            assert!(!schema.description.is_empty());
            assert!(schema.annotations.is_some(), "{} lacks annotations", schema.name);
        }
    }
}
