//! Chat message history API endpoints.

use crate::client::FlowiseClient;
use crate::error::FlowiseResult;
use serde::Serialize;
use serde_json::Value;

/// Chat messages API for reading and deleting conversation history.
pub struct ChatMessagesApi<'a> {
    client: &'a FlowiseClient,
}

impl<'a> ChatMessagesApi<'a> {
    pub(crate) fn new(client: &'a FlowiseClient) -> Self {
        Self { client }
    }

    /// Get chat history for a flow, optionally filtered by session.
    pub async fn history(&self, query: &ChatHistoryQuery) -> FlowiseResult<Value> {
        self.client.http.get_with_query("chatmessage", query).await
    }

    /// Delete chat history for a flow, optionally scoped to one session
    /// or chat. The DELETE is always scoped to the given flow ID.
    pub async fn delete(
        &self,
        flow_id: &str,
        query: &DeleteChatHistoryQuery,
    ) -> FlowiseResult<Value> {
        self.client
            .http
            .delete_with_query(&format!("chatmessage/{}", flow_id), query)
            .await
    }
}

/// Query parameters for fetching chat history.
#[derive(Debug, Clone, Serialize)]
pub struct ChatHistoryQuery {
    pub chatflowid: String,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Query parameters for deleting chat history.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteChatHistoryQuery {
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(rename = "chatId", skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}
