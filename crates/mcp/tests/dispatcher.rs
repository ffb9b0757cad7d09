//! End-to-end dispatch tests against a mock Flowise instance.

use flowise_client::FlowiseClient;
use flowise_mcp::{default_registry, McpServer};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "fk-test-key";

fn server_for(base_url: &str) -> McpServer {
    let client = Arc::new(
        FlowiseClient::builder()
            .base_url(base_url)
            .api_key(API_KEY)
            .build()
            .unwrap(),
    );
    McpServer::new(default_registry(client.clone()), client)
}

async fn call_tool(server: &McpServer, name: &str, arguments: Value) -> Value {
    let message = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    });
    let response = server
        .handle_message(&message.to_string())
        .await
        .expect("tool calls always get a response");
    assert!(response.error.is_none(), "unexpected protocol error");
    response.result.expect("tool calls return a result")
}

fn result_text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().unwrap()
}

#[tokio::test]
async fn missing_required_argument_makes_no_http_call() {
    let mock = MockServer::start().await;
    let server = server_for(&mock.uri());

    let result = call_tool(&server, "flowise_get_flow", json!({})).await;

    assert_eq!(result["isError"], true);
    assert!(result_text(&result).contains("flow_id"));
    assert!(mock.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn well_formed_call_sends_bearer_auth_once() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/chatflows/f1"))
        .and(header("Authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "f1",
            "name": "Support Bot",
            "type": "CHATFLOW",
            "deployed": true
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock.uri());
    let result = call_tool(&server, "flowise_get_flow", json!({"flow_id": "f1"})).await;

    assert!(result["isError"].is_null());
    assert!(result_text(&result).contains("Support Bot"));
}

#[tokio::test]
async fn empty_update_is_validation_error_without_http_call() {
    let mock = MockServer::start().await;
    let server = server_for(&mock.uri());

    let result = call_tool(&server, "flowise_update_flow", json!({"flow_id": "f1"})).await;

    assert_eq!(result["isError"], true);
    assert!(result_text(&result).contains("No fields provided"));
    assert!(mock.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn upstream_error_surfaces_as_tool_error_without_retry() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/chatflows/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock.uri());
    let result = call_tool(&server, "flowise_get_flow", json!({"flow_id": "missing"})).await;

    assert_eq!(result["isError"], true);
    assert!(result_text(&result).contains("not found"));
}

#[tokio::test]
async fn ping_reports_unreachable_instance() {
    // Nothing listens here.
    let server = server_for("http://127.0.0.1:9");
    let result = call_tool(&server, "flowise_ping", json!({})).await;

    assert_eq!(result["isError"], true);
    assert!(result_text(&result).starts_with("Error"));
}

#[tokio::test]
async fn delete_chat_history_hits_delete_endpoint_only() {
    let mock = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/chatmessage/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": 3})))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock.uri());
    let result = call_tool(
        &server,
        "flowise_delete_chat_history",
        json!({"flow_id": "f1", "session_id": "s1"}),
    )
    .await;

    assert!(result["isError"].is_null());
    assert!(result_text(&result).contains("session `s1`"));

    let requests = mock.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method.as_str(), "DELETE");
}

#[tokio::test]
async fn analyze_flags_missing_error_handling() {
    let flow_data = json!({
        "nodes": [
            {"id": "llm_0", "data": {"name": "chatOpenAI", "label": "ChatOpenAI"}},
            {"id": "mem_0", "data": {"name": "bufferMemory", "label": "Buffer Memory"}}
        ],
        "edges": []
    });
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/chatflows/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "f1",
            "name": "Bot",
            "type": "CHATFLOW",
            "flowData": flow_data.to_string()
        })))
        .mount(&mock)
        .await;

    let server = server_for(&mock.uri());
    let result = call_tool(&server, "flowise_analyze_flow", json!({"flow_id": "f1"})).await;

    assert!(result["isError"].is_null());
    let text = result_text(&result);
    assert!(
        text.contains("Error Handling"),
        "analysis should flag missing error handling: {}",
        text
    );
}

#[tokio::test]
async fn create_then_list_round_trip() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chatflows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "new-1",
            "name": "Fresh Flow",
            "type": "CHATFLOW"
        })))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/chatflows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "new-1", "name": "Fresh Flow", "type": "CHATFLOW", "deployed": false}
        ])))
        .mount(&mock)
        .await;

    let server = server_for(&mock.uri());

    let created = call_tool(
        &server,
        "flowise_create_flow",
        json!({
            "name": "Fresh Flow",
            "flow_data": "{\"nodes\": [], \"edges\": []}"
        }),
    )
    .await;
    assert!(created["isError"].is_null());
    assert!(result_text(&created).contains("new-1"));

    let listed = call_tool(&server, "flowise_list_flows", json!({})).await;
    assert!(result_text(&listed).contains("Fresh Flow"));
}

#[tokio::test]
async fn predict_forwards_question_and_extracts_answer() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/prediction/f1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"text": "The answer is 42."})),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock.uri());
    let result = call_tool(
        &server,
        "flowise_predict",
        json!({"flow_id": "f1", "question": "What is the answer?"}),
    )
    .await;

    assert!(result["isError"].is_null());
    assert!(result_text(&result).contains("The answer is 42."));
}
