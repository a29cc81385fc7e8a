//! Workflow state and phase derivation

use tracing::debug;

use super::WorkflowError;

/// Where the session is in the workflow
///
/// Derived from which [`WorkflowState`] fields are present; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No titles generated
    Idle,
    /// Titles generated (possibly zero of them), nothing selected
    TitlesReady,
    /// A title is selected, no post yet
    TitleSelected,
    /// A post exists for the selected title
    PostReady,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::TitlesReady => "titles-ready",
            Phase::TitleSelected => "title-selected",
            Phase::PostReady => "post-ready",
        };
        write!(f, "{}", name)
    }
}

/// Data for one session
///
/// Invariants:
/// - `selected_title` was a member of `titles` when it was selected, and is
///   cleared whenever `titles` is replaced.
/// - `post_body` is only present while `selected_title` is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowState {
    keyword: String,
    /// `None` until a title generation succeeds; `Some(vec![])` is a valid,
    /// if useless, result.
    titles: Option<Vec<String>>,
    selected_title: Option<String>,
    post_body: Option<String>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match (&self.titles, &self.selected_title, &self.post_body) {
            (_, Some(_), Some(_)) => Phase::PostReady,
            (_, Some(_), None) => Phase::TitleSelected,
            (Some(_), None, _) => Phase::TitlesReady,
            (None, None, _) => Phase::Idle,
        }
    }

    /// Keyword of the last successful title generation
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Current title options; empty when none were generated
    pub fn titles(&self) -> &[String] {
        self.titles.as_deref().unwrap_or_default()
    }

    pub fn selected_title(&self) -> Option<&str> {
        self.selected_title.as_deref()
    }

    pub fn post_body(&self) -> Option<&str> {
        self.post_body.as_deref()
    }

    /// Install a fresh set of titles, discarding any selection and post
    pub(crate) fn replace_titles(&mut self, keyword: &str, titles: Vec<String>) {
        debug!(%keyword, count = titles.len(), "WorkflowState::replace_titles: called");
        self.keyword = keyword.to_string();
        self.titles = Some(titles);
        self.selected_title = None;
        self.post_body = None;
    }

    /// Select one of the current titles, discarding any existing post
    pub(crate) fn select(&mut self, candidate: &str) -> Result<(), WorkflowError> {
        debug!(%candidate, "WorkflowState::select: called");
        if !self.titles().iter().any(|t| t == candidate) {
            return Err(WorkflowError::UnknownTitle(candidate.to_string()));
        }
        self.selected_title = Some(candidate.to_string());
        self.post_body = None;
        Ok(())
    }

    /// Title to write a post for, if generating one is legal right now
    ///
    /// One post per selection: a second attempt needs a new selection or a
    /// reset, so an expensive call is never repeated by accident.
    pub(crate) fn post_target(&self) -> Result<&str, WorkflowError> {
        let title = self.selected_title.as_deref().ok_or(WorkflowError::NoTitleSelected)?;
        if self.post_body.is_some() {
            return Err(WorkflowError::PostAlreadyGenerated);
        }
        Ok(title)
    }

    /// Store the generated post for the current selection
    pub(crate) fn set_post_body(&mut self, body: String) -> Result<(), WorkflowError> {
        self.post_target()?;
        self.post_body = Some(body);
        Ok(())
    }

    /// Back to an empty session; the keyword goes too
    pub(crate) fn clear(&mut self) {
        debug!("WorkflowState::clear: called");
        *self = Self::default();
    }
}
