//! MCP server for Flowise.
//!
//! Exposes a Flowise instance (chatflows, agentflows, assistants, document
//! stores, vector stores and chat history) as MCP tools, prompts and
//! resources over JSON-RPC 2.0 on stdio.

pub mod analysis;
pub mod format;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

pub use server::{McpServer, PROTOCOL_VERSION, SERVER_NAME};
pub use tools::{default_registry, Tool, ToolRegistry};
