//! Session controller - drives workflow events against the completion service

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{Phase, WorkflowError, WorkflowState};
use crate::config::{Config, SamplingConfig};
use crate::export::PostDownload;
use crate::extract::extract_titles;
use crate::llm::{LlmClient, LlmError};
use crate::prompts::{PromptLoader, PromptRequest};

/// Owns one session's [`WorkflowState`] and applies events to it
///
/// Events must be applied one at a time; every method takes `&mut self`, so
/// the borrow checker enforces that within one owner. A failed event leaves
/// the state exactly as it was.
pub struct SessionController {
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    model: String,
    titles_sampling: SamplingConfig,
    post_sampling: SamplingConfig,
    state: WorkflowState,
}

impl SessionController {
    /// Create a controller with model and sampling settings from config
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader, config: &Config) -> Self {
        debug!(model = %config.llm.model, "SessionController::new: called");
        Self {
            llm,
            prompts,
            model: config.llm.model.clone(),
            titles_sampling: config.generation.titles,
            post_sampling: config.generation.post,
            state: WorkflowState::new(),
        }
    }

    /// Default settings and embedded prompts only
    pub fn with_defaults(llm: Arc<dyn LlmClient>) -> Self {
        Self::new(llm, PromptLoader::embedded_only(), &Config::default())
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// GenerateTitles: ask for title options about `keyword`
    ///
    /// On success the titles replace the old ones and any selection or post is
    /// dropped. Zero extracted titles is still success.
    pub async fn generate_titles(&mut self, keyword: &str) -> Result<&[String], WorkflowError> {
        debug!(%keyword, "generate_titles: called");
        let keyword = keyword.trim();
        if keyword.is_empty() {
            debug!("generate_titles: empty keyword");
            return Err(WorkflowError::EmptyKeyword);
        }

        let request = PromptRequest::titles(keyword, &self.model, self.titles_sampling);
        let completion = self.prompts.render(request)?;
        let response = self.llm.complete(completion).await.inspect_err(|e| {
            warn!(error = %e, "generate_titles: completion failed");
        })?;

        let titles = extract_titles(response.content.trim());
        if titles.is_empty() {
            warn!(%keyword, "generate_titles: no numbered titles in response");
        }
        self.state.replace_titles(keyword, titles);
        info!(%keyword, count = self.state.titles().len(), phase = %self.phase(), "Titles generated");
        Ok(self.state.titles())
    }

    /// SelectTitle: choose one of the current titles by value
    pub fn select_title(&mut self, candidate: &str) -> Result<(), WorkflowError> {
        debug!(%candidate, "select_title: called");
        self.state.select(candidate)?;
        info!(title = %candidate, phase = %self.phase(), "Title selected");
        Ok(())
    }

    /// SelectTitle by 1-based position in the current list
    pub fn select_index(&mut self, index: usize) -> Result<&str, WorkflowError> {
        debug!(%index, "select_index: called");
        let count = self.state.titles().len();
        let candidate = index
            .checked_sub(1)
            .and_then(|i| self.state.titles().get(i))
            .cloned()
            .ok_or(WorkflowError::TitleIndexOutOfRange { index, count })?;
        self.select_title(&candidate)?;
        Ok(self.state.selected_title().unwrap_or_default())
    }

    /// GeneratePost: write the full post for the selected title
    ///
    /// Rejected without calling the service unless a title is selected and no
    /// post exists for it yet.
    pub async fn generate_post(&mut self) -> Result<&str, WorkflowError> {
        debug!("generate_post: called");
        let title = self.state.post_target()?.to_string();

        let request = PromptRequest::post(&title, &self.model, self.post_sampling);
        let completion = self.prompts.render(request)?;
        let response = self.llm.complete(completion).await.inspect_err(|e| {
            warn!(error = %e, "generate_post: completion failed");
        })?;

        let body = response.content.trim();
        if body.is_empty() {
            return Err(LlmError::InvalidResponse("model returned an empty post".to_string()).into());
        }
        self.state.set_post_body(body.to_string())?;
        info!(%title, chars = body.len(), phase = %self.phase(), "Post generated");
        Ok(self.state.post_body().unwrap_or_default())
    }

    /// Reset: back to Idle, keyword included
    pub fn reset(&mut self) {
        debug!("reset: called");
        self.state.clear();
        info!("Session reset");
    }

    /// The current post as a downloadable file
    pub fn download(&self) -> Result<PostDownload, WorkflowError> {
        match (self.state.selected_title(), self.state.post_body()) {
            (Some(title), Some(body)) => Ok(PostDownload::new(title, body)),
            _ => Err(WorkflowError::NoPost),
        }
    }

    /// Write the current post into `dir`, returning the path used
    pub fn save_post(&self, dir: &Path) -> Result<PathBuf, WorkflowError> {
        debug!(?dir, "save_post: called");
        Ok(self.download()?.save(dir)?)
    }
}
