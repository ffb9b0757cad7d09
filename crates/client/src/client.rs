//! Main client for the Flowise API.

use crate::api::*;
use crate::config::ClientConfig;
use crate::error::{FlowiseError, FlowiseResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with a Flowise instance.
#[derive(Clone)]
pub struct FlowiseClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl FlowiseClient {
    /// Create a new client builder.
    pub fn builder() -> FlowiseClientBuilder {
        FlowiseClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> FlowiseResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Create a client from the `FLOWISE_*` environment variables.
    pub fn from_env() -> FlowiseResult<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Get the flows API.
    pub fn flows(&self) -> FlowsApi<'_> {
        FlowsApi::new(self)
    }

    /// Get the predictions API.
    pub fn predictions(&self) -> PredictionsApi<'_> {
        PredictionsApi::new(self)
    }

    /// Get the assistants API.
    pub fn assistants(&self) -> AssistantsApi<'_> {
        AssistantsApi::new(self)
    }

    /// Get the document stores API.
    pub fn document_stores(&self) -> DocumentStoresApi<'_> {
        DocumentStoresApi::new(self)
    }

    /// Get the vectors API.
    pub fn vectors(&self) -> VectorsApi<'_> {
        VectorsApi::new(self)
    }

    /// Get the chat messages API.
    pub fn chat_messages(&self) -> ChatMessagesApi<'_> {
        ChatMessagesApi::new(self)
    }

    /// Get the variables API.
    pub fn variables(&self) -> VariablesApi<'_> {
        VariablesApi::new(self)
    }

    /// Get the tools API.
    pub fn tools(&self) -> ToolsApi<'_> {
        ToolsApi::new(self)
    }

    /// Get the health API.
    pub fn health(&self) -> HealthApi<'_> {
        HealthApi::new(self)
    }
}

/// Builder for creating a FlowiseClient.
pub struct FlowiseClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl FlowiseClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the base URL of the Flowise instance.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> FlowiseResult<FlowiseClient> {
        let base_url_str = self
            .base_url
            .ok_or_else(|| FlowiseError::Config("base_url is required".to_string()))?;
        let api_key = self
            .api_key
            .ok_or_else(|| FlowiseError::Config("api_key is required".to_string()))?;

        let base_url = Url::parse(&base_url_str)?;

        let config = ClientConfig {
            base_url,
            api_key,
            timeout: self.timeout,
        };

        FlowiseClient::from_config(config)
    }
}

impl Default for FlowiseClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
