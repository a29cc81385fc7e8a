//! OpenAI-compatible chat completions client
//!
//! Implements the LlmClient trait against `{base_url}/v1/chat/completions`.
//! Groq serves the same API under `https://api.groq.com/openai`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{CompletionRequest, CompletionResponse, FinishReason, LlmClient, LlmError, TokenUsage};
use crate::config::LlmConfig;

/// OpenAI-compatible API client
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    http: Client,
    timeout: Duration,
}

impl OpenAIClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the configured environment variable once; the
    /// key is immutable for the lifetime of the client.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(provider = %config.provider, base_url = %config.base_url, "from_config: called");
        let api_key = config.api_key().ok_or_else(|| LlmError::MissingApiKey {
            env: config.api_key_env.clone(),
        })?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            timeout,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// Build the request body for the chat completions API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(model = %request.model, %request.max_tokens, "build_request_body: called");
        serde_json::json!({
            "model": request.model,
            "messages": request.messages,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        })
    }

    /// Parse the API response, taking the first choice
    fn parse_response(&self, api_response: OpenAIResponse) -> Result<CompletionResponse, LlmError> {
        debug!(choices = %api_response.choices.len(), "parse_response: called");
        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("response contained no choices".to_string()))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| LlmError::InvalidResponse("first choice has no message content".to_string()))?;

        let usage = api_response
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            finish_reason: FinishReason::from_api(choice.finish_reason.as_deref()),
            usage,
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            debug!(timeout = ?self.timeout, "map_send_error: request timed out");
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Network(e)
        }
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(model = %request.model, %request.max_tokens, "complete: called");
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs);
            warn!(?retry_after, "complete: rate limited (429)");
            return Err(LlmError::RateLimited { retry_after });
        }

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(%status, "complete: API error");
            return Err(LlmError::ApiError { status, message: text });
        }

        let bytes = response.bytes().await.map_err(|e| self.map_send_error(e))?;
        let api_response: OpenAIResponse = serde_json::from_slice(&bytes)?;
        let parsed = self.parse_response(api_response)?;
        info!(
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            finish_reason = ?parsed.finish_reason,
            "complete: success"
        );
        Ok(parsed)
    }
}

// Chat completions response types

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Message;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn test_client(base_url: &str) -> OpenAIClient {
        OpenAIClient {
            api_key: "test-key".to_string(),
            base_url: base_url.to_string(),
            http: Client::new(),
            timeout: Duration::from_secs(5),
        }
    }

    fn titles_request() -> CompletionRequest {
        CompletionRequest {
            messages: vec![Message::user("Generate 4 blog title options")],
            model: "llama3-8b-8192".to_string(),
            temperature: 0.7,
            max_tokens: 300,
        }
    }

    /// Serve exactly one HTTP response, returning the raw request text
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            let lower = l.to_ascii_lowercase();
                            lower.strip_prefix("content-length:").map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "{}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });
        (format!("http://{}", addr), handle)
    }

    #[test]
    fn test_build_request_body() {
        let client = test_client("https://api.groq.com/openai");
        let body = client.build_request_body(&titles_request());

        assert_eq!(body["model"], "llama3-8b-8192");
        assert_eq!(body["max_tokens"], 300);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Generate 4 blog title options");
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn test_endpoint() {
        let client = test_client("https://api.groq.com/openai");
        assert_eq!(client.endpoint(), "https://api.groq.com/openai/v1/chat/completions");
    }

    #[test]
    fn test_parse_response_first_choice() {
        let client = test_client("http://unused");
        let api: OpenAIResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"1. Foo"},"finish_reason":"stop"}],
                "usage":{"prompt_tokens":12,"completion_tokens":5,"total_tokens":17}}"#,
        )
        .unwrap();
        let resp = client.parse_response(api).unwrap();
        assert_eq!(resp.content, "1. Foo");
        assert_eq!(resp.finish_reason, FinishReason::Stop);
        assert_eq!(resp.usage.input_tokens, 12);
        assert_eq!(resp.usage.output_tokens, 5);
    }

    #[test]
    fn test_parse_response_no_choices_is_invalid() {
        let client = test_client("http://unused");
        let api: OpenAIResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(client.parse_response(api), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_response_null_content_is_invalid() {
        let client = test_client("http://unused");
        let api: OpenAIResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null},"finish_reason":"length"}]}"#).unwrap();
        assert!(matches!(client.parse_response(api), Err(LlmError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_complete_round_trip() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"choices":[{"message":{"content":"1. Essential Tips"},"finish_reason":"stop"}],"usage":{"prompt_tokens":3,"completion_tokens":4}}"#,
        )
        .await;

        let client = test_client(&url);
        let resp = client.complete(titles_request()).await.unwrap();
        assert_eq!(resp.content, "1. Essential Tips");

        let raw_request = server.await.unwrap();
        assert!(raw_request.starts_with("POST /v1/chat/completions"));
        assert!(raw_request.to_ascii_lowercase().contains("authorization: bearer test-key"));
        assert!(raw_request.contains("llama3-8b-8192"));
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let (url, server) = serve_once("HTTP/1.1 401 Unauthorized", r#"{"error":"Invalid API Key"}"#).await;

        let client = test_client(&url);
        let err = client.complete(titles_request()).await.unwrap_err();
        match err {
            LlmError::ApiError { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("Invalid API Key"));
            }
            other => panic!("Expected ApiError, got {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_complete_rate_limited_is_not_retried() {
        let (url, server) = serve_once("HTTP/1.1 429 Too Many Requests", "{}").await;

        let client = test_client(&url);
        let err = client.complete(titles_request()).await.unwrap_err();
        assert!(err.is_rate_limit());
        assert_eq!(err.retry_after(), None);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_complete_rate_limited_keeps_server_hint() {
        let (url, server) = serve_once("HTTP/1.1 429 Too Many Requests\r\nretry-after: 7", "{}").await;

        let client = test_client(&url);
        let err = client.complete(titles_request()).await.unwrap_err();
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_complete_times_out_when_server_is_silent() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            // Hold the connection open without ever answering
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let timeout = Duration::from_millis(300);
        let client = OpenAIClient {
            http: Client::builder().timeout(timeout).build().unwrap(),
            timeout,
            ..test_client(&url)
        };
        let err = client.complete(titles_request()).await.unwrap_err();
        server.abort();

        assert!(matches!(err, LlmError::Timeout(d) if d == timeout), "got {err:?}");
        assert!(crate::workflow::WorkflowError::from(err).is_service());
    }

    #[tokio::test]
    async fn test_complete_malformed_body() {
        let (url, server) = serve_once("HTTP/1.1 200 OK", "not json").await;

        let client = test_client(&url);
        let err = client.complete(titles_request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Json(_)));
        server.await.unwrap();
    }
}
