//! Per-call prompt requests

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::SamplingConfig;
use crate::llm::{CompletionRequest, Message};

/// Which template a request renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Titles,
    Post,
}

impl PromptKind {
    /// Template file stem for this kind
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Titles => "titles",
            Self::Post => "post",
        }
    }
}

impl std::fmt::Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.template_name())
    }
}

/// Everything needed to render and send one prompt
///
/// Built fresh for every call and dropped once the completion returns.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub kind: PromptKind,
    pub params: BTreeMap<String, String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl PromptRequest {
    /// Request for title options about a keyword
    pub fn titles(keyword: &str, model: &str, sampling: SamplingConfig) -> Self {
        debug!(%keyword, "PromptRequest::titles: called");
        Self::new(PromptKind::Titles, "keyword", keyword, model, sampling)
    }

    /// Request for a full post with the given title
    pub fn post(title: &str, model: &str, sampling: SamplingConfig) -> Self {
        debug!(%title, "PromptRequest::post: called");
        Self::new(PromptKind::Post, "title", title, model, sampling)
    }

    fn new(kind: PromptKind, key: &str, value: &str, model: &str, sampling: SamplingConfig) -> Self {
        Self {
            kind,
            params: BTreeMap::from([(key.to_string(), value.to_string())]),
            model: model.to_string(),
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
        }
    }

    /// Wrap the rendered prompt as a single user message
    pub fn into_completion(self, rendered: String) -> CompletionRequest {
        CompletionRequest {
            messages: vec![Message::user(rendered)],
            model: self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}
