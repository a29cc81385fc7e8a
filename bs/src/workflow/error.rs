//! Workflow error types

use thiserror::Error;

use crate::export::ExportError;
use crate::llm::LlmError;
use crate::prompts::PromptError;

/// Why a workflow event did not go through
///
/// None of these leave partial state behind: a failed event is as if it had
/// never been attempted.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Please enter a topic.")]
    EmptyKeyword,

    #[error("'{0}' is not one of the current title options")]
    UnknownTitle(String),

    #[error("No title option {index}; choose 1-{count}")]
    TitleIndexOutOfRange { index: usize, count: usize },

    #[error("Select a title before generating a post")]
    NoTitleSelected,

    #[error("A post already exists for this title; select a title again or reset to regenerate")]
    PostAlreadyGenerated,

    #[error("No post has been generated yet")]
    NoPost,

    #[error("Error: {0}")]
    Service(#[from] LlmError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl WorkflowError {
    /// Input problems the user fixes by typing something else
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WorkflowError::EmptyKeyword | WorkflowError::UnknownTitle(_) | WorkflowError::TitleIndexOutOfRange { .. }
        )
    }

    /// Events that are not legal in the current phase
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            WorkflowError::NoTitleSelected | WorkflowError::PostAlreadyGenerated | WorkflowError::NoPost
        )
    }

    /// Failures of the completion call itself
    pub fn is_service(&self) -> bool {
        matches!(self, WorkflowError::Service(_))
    }
}
