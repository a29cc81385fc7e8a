//! REPL session management

use std::path::{Path, PathBuf};

use colored::Colorize;
use eyre::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};

use super::command::ReplCommand;
use super::spinner::with_spinner;
use crate::tui;
use crate::workflow::{Phase, SessionController, WorkflowError};

/// Whether the main loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Interactive REPL session
pub struct ReplSession {
    controller: SessionController,
    output_dir: PathBuf,
}

impl ReplSession {
    /// Create a new REPL session
    pub fn new(controller: SessionController, output_dir: PathBuf) -> Self {
        Self { controller, output_dir }
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Run the REPL main loop
    ///
    /// Each command runs to completion before the next line is read, so
    /// workflow events never overlap.
    pub async fn run(&mut self, initial_keyword: Option<String>) -> Result<()> {
        self.print_welcome();

        if let Some(keyword) = initial_keyword {
            println!("{} {}", ">".bright_green(), keyword);
            self.handle(ReplCommand::Titles(keyword)).await?;
        }

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", self.prompt_marker()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(input);

                    if self.handle(ReplCommand::parse(input)).await? == Flow::Quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Prompt marker reflecting the current phase
    fn prompt_marker(&self) -> colored::ColoredString {
        match self.controller.phase() {
            Phase::Idle => ">".bright_green(),
            Phase::TitlesReady => "titles>".bright_green(),
            Phase::TitleSelected => "selected>".bright_green(),
            Phase::PostReady => "post>".bright_green(),
        }
    }

    /// Apply one command
    ///
    /// Workflow failures are reported and the loop continues; only terminal
    /// or pager failures propagate.
    pub(crate) async fn handle(&mut self, command: ReplCommand) -> Result<Flow> {
        debug!(?command, "handle: called");
        match command {
            ReplCommand::Titles(keyword) => self.generate_titles(&keyword).await,
            ReplCommand::Select(choice) => self.select(&choice),
            ReplCommand::Post => self.generate_post().await,
            ReplCommand::Show => match self.controller.state().post_body() {
                Some(body) => print_markdown(body),
                None => report(&WorkflowError::NoPost),
            },
            ReplCommand::View => self.view().await?,
            ReplCommand::Save(dir) => self.save(dir.as_deref()),
            ReplCommand::Reset => {
                self.controller.reset();
                println!("{}", "Session reset.".dimmed());
            }
            ReplCommand::State => self.print_state(),
            ReplCommand::Help => self.print_help(),
            ReplCommand::Quit => return Ok(Flow::Quit),
            ReplCommand::Unknown(cmd) => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
            }
        }
        Ok(Flow::Continue)
    }

    async fn generate_titles(&mut self, keyword: &str) {
        let result = with_spinner("Thinking...", self.controller.generate_titles(keyword)).await;
        match result {
            Ok(titles) if titles.is_empty() => {
                println!(
                    "{} No numbered titles found in the response. Try a different keyword.",
                    "⚠".yellow()
                );
            }
            Ok(titles) => {
                println!();
                println!("{}", "Choose a Title".bright_cyan().bold());
                for (i, title) in titles.iter().enumerate() {
                    println!("  {} {}", format!("{}.", i + 1).yellow(), title);
                }
                println!();
                println!("Pick one with {}", "/select <n>".yellow());
            }
            Err(e) => report(&e),
        }
    }

    fn select(&mut self, choice: &str) {
        let result = match choice.parse::<usize>() {
            Ok(index) => self.controller.select_index(index).map(str::to_string),
            Err(_) => self.controller.select_title(choice).map(|_| choice.to_string()),
        };
        match result {
            Ok(title) => {
                println!("{} {}", "Selected:".bright_cyan(), title);
                println!("Generate the post with {}", "/post".yellow());
            }
            Err(e) => report(&e),
        }
    }

    async fn generate_post(&mut self) {
        let result = with_spinner("Writing full blog post...", self.controller.generate_post()).await;
        match result {
            Ok(body) => {
                print_markdown(body);
                println!(
                    "{} for the full-screen reader, {} to download as markdown",
                    "/view".yellow(),
                    "/save".yellow()
                );
            }
            Err(e) => report(&e),
        }
    }

    async fn view(&self) -> Result<()> {
        let download = match self.controller.download() {
            Ok(d) => d,
            Err(e) => {
                report(&e);
                return Ok(());
            }
        };
        let title = self.controller.state().selected_title().unwrap_or_default().to_string();
        tokio::task::spawn_blocking(move || tui::view_markdown(&title, &download.content))
            .await
            .context("Pager task failed")?
            .context("Pager failed")
    }

    fn save(&self, dir: Option<&Path>) {
        let dir = dir.map(expand_home).unwrap_or_else(|| self.output_dir.clone());
        match self.controller.save_post(&dir) {
            Ok(path) => println!("{} {}", "Saved:".bright_green(), path.display()),
            Err(e) => report(&e),
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Blogsmith - AI Blog Generator".bright_cyan().bold());
        println!("Enter a blog topic (keyword) to get title ideas.");
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:16} Generate title options (same as typing a keyword)", "/titles <kw>".yellow());
        println!("  {:16} Pick a title by number or exact text", "/select <n>".yellow());
        println!("  {:16} Write the full post for the selected title", "/post".yellow());
        println!("  {:16} Print the post again", "/show".yellow());
        println!("  {:16} Read the post in a full-screen pager", "/view".yellow());
        println!("  {:16} Save the post as <title>.md", "/save [dir]".yellow());
        println!("  {:16} Clear titles, selection and post", "/reset".yellow());
        println!("  {:16} Show where the session is", "/state".yellow());
        println!("  {:16} Show this help", "/help".yellow());
        println!("  {:16} Exit", "/quit".yellow());
        println!();
    }

    fn print_state(&self) {
        let state = self.controller.state();
        println!();
        println!("{} {}", "Phase:".bright_cyan(), state.phase());
        if !state.keyword().is_empty() {
            println!("{} {}", "Keyword:".bright_cyan(), state.keyword());
        }
        for (i, title) in state.titles().iter().enumerate() {
            let marker = if state.selected_title() == Some(title.as_str()) { "*" } else { " " };
            println!(" {} {} {}", marker.bright_green(), format!("{}.", i + 1).yellow(), title);
        }
        if let Some(body) = state.post_body() {
            println!("{} {} chars", "Post:".bright_cyan(), body.len());
        }
        println!();
    }
}

/// Report a failed workflow event to the user
fn report(error: &WorkflowError) {
    if error.is_validation() || error.is_rejected() {
        debug!(%error, "report: warning");
        println!("{} {}", "⚠".yellow(), error.to_string().yellow());
    } else {
        warn!(%error, "report: error");
        println!("{} {}", "✗".red(), error.to_string().red());
    }
    if let Some(hint) = hint(error) {
        println!("  {}", hint.dimmed());
    }
}

/// Follow-up advice for service failures the user can act on
fn hint(error: &WorkflowError) -> Option<&'static str> {
    match error {
        WorkflowError::Service(e) if e.is_auth() => Some("Check that the API key is set and still valid."),
        WorkflowError::Service(e) if e.is_rate_limit() && e.retry_after().is_none() => {
            Some("The service is busy; wait a little before retrying.")
        }
        _ => None,
    }
}

/// Print markdown with headings highlighted
fn print_markdown(body: &str) {
    println!();
    for line in body.lines() {
        if line.starts_with('#') {
            println!("{}", line.bright_cyan().bold());
        } else {
            println!("{}", line);
        }
    }
    println!();
}

/// Resolve a leading `~/` against the home directory
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().map(|home| home.join(rest)).unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
