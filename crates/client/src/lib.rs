//! # Flowise Client
//!
//! Async Rust client for the Flowise REST API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowise_client::{FlowiseClient, FlowiseResult};
//!
//! #[tokio::main]
//! async fn main() -> FlowiseResult<()> {
//!     // Build client
//!     let client = FlowiseClient::builder()
//!         .base_url("http://localhost:3000")
//!         .api_key("fk-your-api-key")
//!         .build()?;
//!
//!     // Check reachability
//!     client.health().ping().await?;
//!
//!     // List flows
//!     let flows = client.flows().list().await?;
//!     println!("{}", serde_json::to_string_pretty(&flows)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! Every request carries the API key as a bearer token and honors the
//! configured timeout. Calls are single-attempt: errors are returned,
//! never retried.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

// Re-export main client
pub use client::{FlowiseClient, FlowiseClientBuilder};
pub use config::ClientConfig;
pub use error::{FlowiseError, FlowiseResult};

// Re-export request types for convenience
pub use api::{
    ChatHistoryQuery, CreateFlowRequest, DeleteChatHistoryQuery, PredictionRequest,
    UpdateFlowRequest, UpsertVectorRequest, VectorQueryRequest,
};
