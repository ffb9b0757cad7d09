//! API endpoint modules, one per Flowise resource family.

mod assistants;
mod chat_messages;
mod document_stores;
mod flows;
mod health;
mod predictions;
mod tools;
mod variables;
mod vectors;

pub use assistants::AssistantsApi;
pub use chat_messages::{ChatHistoryQuery, ChatMessagesApi, DeleteChatHistoryQuery};
pub use document_stores::DocumentStoresApi;
pub use flows::{CreateFlowRequest, FlowsApi, UpdateFlowRequest};
pub use health::HealthApi;
pub use predictions::{PredictionRequest, PredictionsApi};
pub use tools::ToolsApi;
pub use variables::VariablesApi;
pub use vectors::{UpsertVectorRequest, VectorQueryRequest, VectorsApi};
