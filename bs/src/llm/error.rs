//! LLM error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a completion call
///
/// Every variant is surfaced to the user as a service error. Nothing here is
/// retried automatically; the user repeats the action instead.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not found. Set the {env} environment variable.")]
    MissingApiKey { env: String },

    #[error("Unknown LLM provider '{0}'. Supported: groq, openai")]
    UnknownProvider(String),

    #[error("Rate limited{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<Duration> },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, LlmError::RateLimited { .. })
    }

    /// Check if the credential was rejected or missing
    pub fn is_auth(&self) -> bool {
        match self {
            LlmError::MissingApiKey { .. } => true,
            LlmError::ApiError { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Get the server's retry hint if this is a rate limit error that had one
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            LlmError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

fn retry_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(d) => format!(", retry after {}s", d.as_secs()),
        None => String::new(),
    }
}
