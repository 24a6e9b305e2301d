//! LLM gateway port
//!
//! The oracle the deliberation consumes. One call per turn: an ordered
//! list of role-tagged messages in, free text out. Retry policy, model
//! selection, and cost accounting belong to the adapter, never to the
//! orchestrator; the core treats an empty or failed response as "this
//! turn produced nothing" and moves on.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Role of a message in an oracle exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One message in an oracle exchange
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Gateway to the text-generation oracle
///
/// Each call blocks until its result is available; the orchestrator
/// never issues two participant-turn calls concurrently, because each
/// turn's context must include every turn that preceded it.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the ordered context messages and return the raw response
    /// text. May legitimately return an empty string.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError>;
}
