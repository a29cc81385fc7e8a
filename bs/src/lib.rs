//! Blogsmith - interactive keyword-to-blog-post generator
//!
//! A single session walks through four steps: generate title options for a
//! keyword, select one, generate the full post, then save or reset. All text
//! comes from an OpenAI-compatible chat completions service (Groq by default).
//!
//! # Modules
//!
//! - [`workflow`] - session state machine and the controller that drives it
//! - [`extract`] - pulls numbered titles out of free-form model output
//! - [`llm`] - completion client trait and the HTTP implementation
//! - [`prompts`] - the title and post prompt templates
//! - [`export`] - saving the post as `<title>.md`
//! - [`repl`] / [`tui`] - the interactive terminal front end
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod export;
pub mod extract;
pub mod llm;
pub mod prompts;
pub mod repl;
pub mod tui;
pub mod workflow;

// Re-export commonly used types
pub use config::{Config, ConfigError, LlmConfig, SamplingConfig};
pub use export::{ExportError, PostDownload, sanitize_file_stem};
pub use extract::extract_titles;
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient, create_client};
pub use prompts::{PromptError, PromptKind, PromptLoader, PromptRequest};
pub use workflow::{Phase, SessionController, WorkflowError, WorkflowState};
