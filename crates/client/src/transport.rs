//! HTTP transport layer for the Flowise client.
//!
//! Single-attempt requests only: failures and non-success statuses are
//! surfaced to the caller, never retried.

use crate::config::ClientConfig;
use crate::error::{FlowiseError, FlowiseResult};
use reqwest::{header, Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Prefix every Flowise REST endpoint lives under.
const API_PREFIX: &str = "api/v1";

/// HTTP transport for making authenticated Flowise API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> FlowiseResult<Self> {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|_| FlowiseError::Config("Invalid API key format".to_string()))?,
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given endpoint under the `/api/v1` prefix.
    fn build_url(&self, endpoint: &str) -> FlowiseResult<Url> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        let url = format!("{}/{}/{}", base, API_PREFIX, endpoint);
        Ok(Url::parse(&url)?)
    }

    /// Execute a request once and decode the response body.
    ///
    /// A 204 maps to `{"success": true}`; non-JSON bodies come back as a
    /// JSON string value.
    async fn execute(&self, request: RequestBuilder) -> FlowiseResult<Value> {
        let response = request.send().await.map_err(FlowiseError::from_reqwest)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FlowiseError::from_response(status.as_u16(), &body));
        }

        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(serde_json::json!({ "success": true }));
        }

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);

        let body = response.text().await.map_err(FlowiseError::from_reqwest)?;
        if is_json {
            Ok(serde_json::from_str(&body)?)
        } else {
            Ok(Value::String(body))
        }
    }

    /// Execute a GET request.
    pub async fn get(&self, endpoint: &str) -> FlowiseResult<Value> {
        let url = self.build_url(endpoint)?;
        debug!(url = %url, "GET request");
        self.execute(self.client.get(url)).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<Q: Serialize>(
        &self,
        endpoint: &str,
        query: &Q,
    ) -> FlowiseResult<Value> {
        let url = self.build_url(endpoint)?;
        debug!(url = %url, "GET request with query");
        self.execute(self.client.get(url).query(query)).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> FlowiseResult<Value> {
        let url = self.build_url(endpoint)?;
        debug!(url = %url, "POST request");
        self.execute(self.client.post(url).json(body)).await
    }

    /// Execute a PUT request with a JSON body.
    pub async fn put<B: Serialize>(&self, endpoint: &str, body: &B) -> FlowiseResult<Value> {
        let url = self.build_url(endpoint)?;
        debug!(url = %url, "PUT request");
        self.execute(self.client.put(url).json(body)).await
    }

    /// Execute a DELETE request.
    pub async fn delete(&self, endpoint: &str) -> FlowiseResult<Value> {
        let url = self.build_url(endpoint)?;
        debug!(url = %url, "DELETE request");
        self.execute(self.client.delete(url)).await
    }

    /// Execute a DELETE request with query parameters.
    pub async fn delete_with_query<Q: Serialize>(
        &self,
        endpoint: &str,
        query: &Q,
    ) -> FlowiseResult<Value> {
        let url = self.build_url(endpoint)?;
        debug!(url = %url, "DELETE request with query");
        self.execute(self.client.delete(url).query(query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_config(base_url: &str, api_key: &str) -> Arc<ClientConfig> {
        Arc::new(ClientConfig {
            base_url: Url::parse(base_url).unwrap(),
            api_key: api_key.to_string(),
            timeout: Duration::from_secs(5),
        })
    }

    #[tokio::test]
    async fn test_get_request_with_auth_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/chatflows"))
            .and(header("Authorization", "Bearer fk-test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"id": "abc", "name": "Support Bot"}])),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri(), "fk-test-key")).unwrap();

        let result = transport.get("chatflows").await.unwrap();
        assert_eq!(result[0]["name"], "Support Bot");
    }

    #[tokio::test]
    async fn test_post_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/chatflows"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": "new-id", "name": "Created"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri(), "fk")).unwrap();

        let body = serde_json::json!({"name": "Created", "flowData": "{}"});
        let result = transport.post("chatflows", &body).await.unwrap();
        assert_eq!(result["id"], "new-id");
    }

    #[tokio::test]
    async fn test_no_content_maps_to_success() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/chatflows/abc"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri(), "fk")).unwrap();

        let result = transport.delete("chatflows/abc").await.unwrap();
        assert_eq!(result["success"], true);
    }

    #[tokio::test]
    async fn test_non_json_body_returned_as_string() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri(), "fk")).unwrap();

        let result = transport.get("ping").await.unwrap();
        assert_eq!(result, Value::String("pong".to_string()));
    }

    #[tokio::test]
    async fn test_error_status_carries_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/chatflows/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"message": "Chatflow missing not found"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri(), "fk")).unwrap();

        let result = transport.get("chatflows/missing").await;
        match result {
            Err(FlowiseError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Chatflow missing not found");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_retry_on_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/chatflows"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri(), "fk")).unwrap();

        let result = transport.get("chatflows").await;
        assert!(result.is_err());
        // Mock expectation of exactly one request is verified on drop.
    }

    #[tokio::test]
    async fn test_slow_response_maps_to_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/ping"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("pong")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let config = Arc::new(ClientConfig {
            base_url: Url::parse(&server.uri()).unwrap(),
            api_key: "fk".to_string(),
            timeout: Duration::from_millis(100),
        });
        let transport = HttpTransport::new(config).unwrap();

        let result = transport.get("ping").await;
        assert!(matches!(result, Err(FlowiseError::Timeout)));
    }

    #[tokio::test]
    async fn test_connect_error_on_unreachable_host() {
        let config = create_config("http://127.0.0.1:1", "fk");
        let transport = HttpTransport::new(config).unwrap();

        let result = transport.get("ping").await;
        match result {
            Err(FlowiseError::Connect(_)) | Err(FlowiseError::Http(_)) => {}
            other => panic!("expected connectivity error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_query_parameters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/chatmessage"))
            .and(query_param("chatflowid", "flow-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri(), "fk")).unwrap();

        let result = transport
            .get_with_query("chatmessage", &[("chatflowid", "flow-1")])
            .await
            .unwrap();
        assert!(result.as_array().unwrap().is_empty());
    }

    #[test]
    fn test_build_url() {
        let transport = HttpTransport::new(create_config("http://localhost:3000", "fk")).unwrap();
        let url = transport.build_url("chatflows/abc").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/v1/chatflows/abc");
    }

    #[test]
    fn test_build_url_with_trailing_slash() {
        let transport = HttpTransport::new(create_config("http://localhost:3000/", "fk")).unwrap();
        let url = transport.build_url("ping").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/v1/ping");
    }
}
