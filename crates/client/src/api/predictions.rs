//! Prediction API endpoints (chatting with a flow).

use crate::client::FlowiseClient;
use crate::error::FlowiseResult;
use serde::Serialize;
use serde_json::{Map, Value};

/// Predictions API for sending messages to flows.
pub struct PredictionsApi<'a> {
    client: &'a FlowiseClient,
}

impl<'a> PredictionsApi<'a> {
    pub(crate) fn new(client: &'a FlowiseClient) -> Self {
        Self { client }
    }

    /// Send a message to a flow and return its response.
    pub async fn predict(&self, flow_id: &str, request: &PredictionRequest) -> FlowiseResult<Value> {
        self.client
            .http
            .post(&format!("prediction/{}", flow_id), request)
            .await
    }
}

/// Request body for a prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaming: Option<bool>,
    #[serde(rename = "overrideConfig", skip_serializing_if = "Option::is_none")]
    pub override_config: Option<Map<String, Value>>,
}

impl PredictionRequest {
    /// Build a request, folding an optional session ID into the
    /// `overrideConfig.sessionId` slot the way Flowise expects.
    pub fn new(
        question: impl Into<String>,
        session_id: Option<String>,
        streaming: bool,
        override_config: Option<Map<String, Value>>,
    ) -> Self {
        let mut merged = Map::new();
        if let Some(session_id) = session_id {
            merged.insert("sessionId".to_string(), Value::String(session_id));
        }
        if let Some(config) = override_config {
            merged.extend(config);
        }

        Self {
            question: question.into(),
            streaming: if streaming { Some(true) } else { None },
            override_config: if merged.is_empty() { None } else { Some(merged) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_folded_into_override_config() {
        let request =
            PredictionRequest::new("hello", Some("session-1".to_string()), false, None);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["question"], "hello");
        assert_eq!(json["overrideConfig"]["sessionId"], "session-1");
        assert!(json.get("streaming").is_none());
    }

    #[test]
    fn test_explicit_override_config_merged() {
        let mut config = Map::new();
        config.insert("temperature".to_string(), serde_json::json!(0.2));

        let request =
            PredictionRequest::new("hi", Some("s".to_string()), true, Some(config));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["streaming"], true);
        assert_eq!(json["overrideConfig"]["sessionId"], "s");
        assert_eq!(json["overrideConfig"]["temperature"], 0.2);
    }

    #[test]
    fn test_minimal_request_has_only_question() {
        let request = PredictionRequest::new("hi", None, false, None);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"question": "hi"}));
    }
}
