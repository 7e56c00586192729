//! Chat Completions request body.

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::query::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// `POST /v1/chat/completions` body. Carries no credential; auth travels in
/// the request header only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ChatCompletionRequest {
    /// System instruction plus the query as the sole user message.
    pub fn search(config: &SearchConfig, query: &Query, stream: bool) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![
                ChatMessage::system(&config.system_prompt),
                ChatMessage::user(query.as_str()),
            ],
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            stream,
            user: config.user.clone(),
        }
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}
