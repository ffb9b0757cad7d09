//! Error types for the Flowise client.

use serde::{Deserialize, Serialize};

/// Result type for client operations.
pub type FlowiseResult<T> = Result<T, FlowiseError>;

/// Error types that can occur when talking to a Flowise instance.
#[derive(Debug, thiserror::Error)]
pub enum FlowiseError {
    /// API returned a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Could not reach the Flowise instance.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Other HTTP-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FlowiseError {
    /// Create an API error from a status code and response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(body) {
            Self::Api {
                status,
                message: error_response.message,
            }
        } else {
            Self::Api {
                status,
                message: body.to_string(),
            }
        }
    }

    /// Classify a reqwest error into timeout/connect/other.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else {
            Self::Http(e)
        }
    }

    /// Human-readable message suitable for surfacing to an agent client.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { status, message } => match status {
                401 => "Error: Authentication failed. Please check your FLOWISE_API_KEY \
                        environment variable."
                    .to_string(),
                403 => "Error: Permission denied. Your API key may not have access to this \
                        resource."
                    .to_string(),
                404 => "Error: Resource not found. Please verify the flow ID is correct."
                    .to_string(),
                429 => "Error: Rate limit exceeded. Please wait before making more requests."
                    .to_string(),
                s if *s >= 500 => format!(
                    "Error: Flowise server error (status {}). Check if Flowise is running.",
                    s
                ),
                s => format!("Error: API request failed with status {}: {}", s, message),
            },
            Self::Timeout => {
                "Error: Request timed out. The Flowise server may be overloaded or unreachable."
                    .to_string()
            }
            Self::Connect(_) => "Error: Could not connect to Flowise. Verify FLOWISE_BASE_URL \
                                 and that Flowise is running."
                .to_string(),
            other => format!("Error: {}", other),
        }
    }
}

/// Error response body from the Flowise API.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
