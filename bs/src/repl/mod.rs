//! Interactive REPL for Blogsmith
//!
//! The terminal front end: reads keywords and slash commands, shows title
//! options and the finished post, and forwards each action to the
//! [`SessionController`](crate::workflow::SessionController).

mod command;
mod session;
mod spinner;

pub use command::ReplCommand;
pub use session::ReplSession;

use eyre::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::llm::create_client;
use crate::prompts::PromptLoader;
use crate::workflow::SessionController;

/// Run the interactive session
///
/// Expects `config.validate()` to have passed already; the credential is read
/// once here and kept for the whole session.
pub async fn run_interactive(config: &Config, initial_keyword: Option<String>) -> Result<()> {
    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    let prompts = PromptLoader::new(&config.output.prompts_dir);
    let controller = SessionController::new(llm, prompts, config);

    info!(provider = %config.llm.provider, model = %config.llm.model, "Starting interactive session");
    let mut session = ReplSession::new(controller, config.output.dir.clone());
    session.run(initial_keyword).await
}
