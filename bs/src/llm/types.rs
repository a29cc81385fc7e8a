//! Completion request/response types
//!
//! These model the OpenAI-style chat completions API, which Groq and OpenAI
//! both speak. Only plain text messages are needed here.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A completion request - everything needed for one LLM call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Conversation messages (a single user message for both prompt kinds)
    pub messages: Vec<Message>,

    /// Model identifier sent to the service
    pub model: String,

    /// Sampling temperature, 0.0..=2.0
    pub temperature: f32,

    /// Max tokens for the response
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Text of the first user message, if any
    pub fn prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        debug!("Message::user: called");
        Self {
            role: Role::User,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// Response from a completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Full completion text
    pub content: String,

    /// Why the model stopped
    pub finish_reason: FinishReason,

    /// Token usage reported by the service
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Build a finished response with no usage data
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            finish_reason: FinishReason::Stop,
            usage: TokenUsage::default(),
        }
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    Other,
}

impl FinishReason {
    /// Parse from the API's finish_reason string
    pub fn from_api(s: Option<&str>) -> Self {
        debug!(?s, "FinishReason::from_api: called");
        match s {
            Some("stop") => FinishReason::Stop,
            Some("length") => FinishReason::Length,
            _ => FinishReason::Other,
        }
    }
}

/// Token usage for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
