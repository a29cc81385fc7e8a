//! LLM client module
//!
//! Provides the completion client used to generate titles and posts.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, CompletionResponse, FinishReason, Message, Role, TokenUsage};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Groq and OpenAI both expose the OpenAI chat completions API, so they share
/// one implementation and differ only in base URL and credential.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    if !config.is_supported_provider() {
        debug!(provider = %config.provider, "create_client: unknown provider");
        return Err(LlmError::UnknownProvider(config.provider.clone()));
    }
    debug!("create_client: creating OpenAI-compatible client");
    Ok(Arc::new(OpenAIClient::from_config(config)?))
}
