//! Prompt Loader
//!
//! Loads prompt templates from the override directory or falls back to the
//! embedded defaults, then renders them with Handlebars.

use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use thiserror::Error;
use tracing::{debug, info};

use super::embedded;
use super::request::PromptRequest;
use crate::llm::CompletionRequest;

/// Errors from loading or rendering a prompt template
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Prompt template not found: {0}")]
    NotFound(String),

    #[error("Failed to read prompt {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render template {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `.blogsmith/prompts/`)
    override_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader that checks `override_dir` before the embedded prompts
    pub fn new(override_dir: impl AsRef<Path>) -> Self {
        let override_dir = override_dir.as_ref();
        let exists = override_dir.is_dir();
        debug!(?override_dir, %exists, "PromptLoader::new: called");

        Self {
            hbs: Self::engine(),
            override_dir: exists.then(|| override_dir.to_path_buf()),
        }
    }

    /// Create a loader that only uses embedded prompts (for testing)
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Self::engine(),
            override_dir: None,
        }
    }

    /// Prompts are plain text, so no HTML escaping; unknown variables are errors.
    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        hbs.set_strict_mode(true);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks `<override_dir>/{name}.pmt` first, then the embedded fallback.
    fn load_template(&self, name: &str) -> Result<String, PromptError> {
        debug!(%name, "PromptLoader::load_template: called");
        if let Some(ref dir) = self.override_dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found in override directory");
                return std::fs::read_to_string(&path).map_err(|source| PromptError::Read { path, source });
            }
        }

        embedded::get_embedded(name)
            .map(str::to_string)
            .ok_or_else(|| PromptError::NotFound(name.to_string()))
    }

    /// Render a request's template into the completion request to send
    pub fn render(&self, request: PromptRequest) -> Result<CompletionRequest, PromptError> {
        let name = request.kind.template_name();
        debug!(kind = %request.kind, params = ?request.params, "PromptLoader::render: called");
        let template = self.load_template(name)?;
        let rendered = self
            .hbs
            .render_template(&template, &request.params)
            .map_err(|source| PromptError::Render {
                name: name.to_string(),
                source: Box::new(source),
            })?;
        info!(kind = %request.kind, model = %request.model, "Rendered prompt");
        Ok(request.into_completion(rendered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SamplingConfig;

    const SAMPLING: SamplingConfig = SamplingConfig {
        temperature: 0.8,
        max_tokens: 3000,
    };

    #[test]
    fn test_render_titles_prompt() {
        let loader = PromptLoader::embedded_only();
        let req = PromptRequest::titles("remote work productivity", "llama3-8b-8192", SAMPLING);

        let completion = loader.render(req).unwrap();
        let prompt = completion.prompt().unwrap();
        assert!(prompt.contains(r#"Generate 4 blog title options about "remote work productivity"."#));
        assert!(prompt.contains("Return ONLY a numbered list"));
    }

    #[test]
    fn test_render_does_not_html_escape() {
        let loader = PromptLoader::embedded_only();
        let req = PromptRequest::post("Rust & \"Fearless\" <Concurrency>", "llama3-8b-8192", SAMPLING);

        let completion = loader.render(req).unwrap();
        assert!(completion.prompt().unwrap().contains("Rust & \"Fearless\" <Concurrency>"));
        assert_eq!(completion.max_tokens, 3000);
    }

    #[test]
    fn test_override_directory_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("titles.pmt"), "List titles for {{keyword}} please").unwrap();

        let loader = PromptLoader::new(dir.path());
        let completion = loader
            .render(PromptRequest::titles("gardening", "m", SAMPLING))
            .unwrap();
        assert_eq!(completion.prompt(), Some("List titles for gardening please"));

        // post.pmt is not overridden, so the embedded one is used
        let completion = loader.render(PromptRequest::post("Soil 101", "m", SAMPLING)).unwrap();
        assert!(completion.prompt().unwrap().contains("Soil 101"));
    }

    #[test]
    fn test_override_with_unknown_variable_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("titles.pmt"), "About {{topic}}").unwrap();

        let loader = PromptLoader::new(dir.path());
        let err = loader.render(PromptRequest::titles("x", "m", SAMPLING)).unwrap_err();
        assert!(matches!(err, PromptError::Render { .. }));
    }

    #[test]
    fn test_missing_override_dir_falls_back() {
        let loader = PromptLoader::new("/definitely/not/a/prompts/dir");
        assert!(loader.render(PromptRequest::titles("x", "m", SAMPLING)).is_ok());
    }

    #[test]
    fn test_unknown_template() {
        let loader = PromptLoader::embedded_only();
        assert!(matches!(
            loader.load_template("nonexistent-template"),
            Err(PromptError::NotFound(_))
        ));
    }
}
