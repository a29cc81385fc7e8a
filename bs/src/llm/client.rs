//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless completion client - each call is independent
///
/// One call is one blocking round trip to the service: no retries, no
/// caching, no streaming. Implementations must be safe to share, but the
/// session drives them one request at a time.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request and wait for the full text
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Mock LLM client for unit tests
    ///
    /// Pops one scripted outcome per call and records every request it sees.
    pub struct MockLlmClient {
        outcomes: Mutex<VecDeque<Result<CompletionResponse, LlmError>>>,
        requests: Mutex<Vec<CompletionRequest>>,
        call_count: AtomicUsize,
    }

    impl MockLlmClient {
        pub fn new(outcomes: Vec<Result<CompletionResponse, LlmError>>) -> Self {
            debug!(outcome_count = %outcomes.len(), "MockLlmClient::new: called");
            Self {
                outcomes: Mutex::new(outcomes.into()),
                requests: Mutex::new(Vec::new()),
                call_count: AtomicUsize::new(0),
            }
        }

        /// Convenience constructor for text-only successes
        pub fn with_texts(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Ok(CompletionResponse::text(*t))).collect())
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            debug!("MockLlmClient::complete: called");
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request);
            self.outcomes.lock().unwrap().pop_front().unwrap_or_else(|| {
                debug!("MockLlmClient::complete: no more mock responses");
                Err(LlmError::InvalidResponse("No more mock responses".to_string()))
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::llm::Message;

        fn request() -> CompletionRequest {
            CompletionRequest {
                messages: vec![Message::user("Test")],
                model: "test-model".to_string(),
                temperature: 0.5,
                max_tokens: 100,
            }
        }

        #[tokio::test]
        async fn test_mock_client_returns_responses_in_order() {
            let client = MockLlmClient::with_texts(&["Response 1", "Response 2"]);

            let resp1 = client.complete(request()).await.unwrap();
            assert_eq!(resp1.content, "Response 1");

            let resp2 = client.complete(request()).await.unwrap();
            assert_eq!(resp2.content, "Response 2");

            assert_eq!(client.call_count(), 2);
            assert_eq!(client.requests().len(), 2);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockLlmClient::new(vec![]);
            assert!(client.complete(request()).await.is_err());
            assert_eq!(client.call_count(), 1);
        }
    }
}
