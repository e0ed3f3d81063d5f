//! Chat turn service port and HTTP adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::adapters::ApiError;
use crate::domain::session::Message;

/// Session metadata sent with every turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: Uuid,
    pub turn_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnRequest {
    pub history: Vec<Message>,
    pub new_message: String,
    pub session_context: SessionContext,
}

/// Service reply. `reply_text` may embed the readiness sentinel; the
/// conversation service strips it before display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnReply {
    pub reply_text: String,
    #[serde(default)]
    pub summary: Option<String>,
}

#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn send_turn(&self, request: ChatTurnRequest) -> Result<ChatTurnReply, ApiError>;
}

/// Reqwest-backed implementation of [`ChatApi`].
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpChatApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn send_turn(&self, request: ChatTurnRequest) -> Result<ChatTurnReply, ApiError> {
        let reply = self
            .client
            .post(format!("{}/chat/turn", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatTurnReply>()
            .await?;
        Ok(reply)
    }
}
