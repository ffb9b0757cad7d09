//! Binary entry point for the Flowise MCP server.

use anyhow::{Context, Result};
use flowise_client::{ClientConfig, FlowiseClient};
use flowise_mcp::{default_registry, McpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env().context("failed to load Flowise configuration")?;
    info!(base_url = %config.base_url, "connecting to Flowise");

    let client = Arc::new(FlowiseClient::from_config(config)?);
    let registry = default_registry(client.clone());

    let server = McpServer::new(registry, client);
    server.run_stdio().await
}
