//! Configuration types for the Flowise client.

use crate::error::{FlowiseError, FlowiseResult};
use std::time::Duration;
use url::Url;

/// Environment variable holding the Flowise base URL.
pub const ENV_BASE_URL: &str = "FLOWISE_BASE_URL";
/// Environment variable holding the Flowise API key.
pub const ENV_API_KEY: &str = "FLOWISE_API_KEY";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT: &str = "FLOWISE_TIMEOUT";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the Flowise client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Flowise instance.
    pub base_url: Url,
    /// API key for authentication.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL and API key.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read configuration from `FLOWISE_BASE_URL`, `FLOWISE_API_KEY`
    /// and `FLOWISE_TIMEOUT`.
    ///
    /// The base URL and API key are required; a missing value is a
    /// configuration error intended to be fatal at startup.
    pub fn from_env() -> FlowiseResult<Self> {
        let base_url_str = std::env::var(ENV_BASE_URL)
            .map_err(|_| FlowiseError::Config(format!("{} is not set", ENV_BASE_URL)))?;
        let api_key = std::env::var(ENV_API_KEY)
            .map_err(|_| FlowiseError::Config(format!("{} is not set", ENV_API_KEY)))?;

        let base_url = Url::parse(&base_url_str)?;

        let timeout = match std::env::var(ENV_TIMEOUT) {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    FlowiseError::Config(format!(
                        "{} must be a number of seconds, got '{}'",
                        ENV_TIMEOUT, raw
                    ))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url,
            api_key,
            timeout,
        })
    }
}
