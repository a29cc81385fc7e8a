//! Prompt Template System
//!
//! Two templates drive the workflow: `titles` (keyword -> numbered list of
//! title options) and `post` (selected title -> full markdown post).
//!
//! Template loading chain:
//! 1. `<prompts-dir>/{name}.pmt` (user override, default `.blogsmith/prompts/`)
//! 2. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution.

pub mod embedded;
mod loader;
mod request;

pub use loader::{PromptError, PromptLoader};
pub use request::{PromptKind, PromptRequest};
