//! REPL input parsing

use std::path::PathBuf;

/// One line of user input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Generate title options (plain input or `/titles <keyword>`)
    Titles(String),
    /// Select a title by number or exact text
    Select(String),
    /// Generate the post for the selected title
    Post,
    /// Print the current post again
    Show,
    /// Open the current post in the full-screen pager
    View,
    /// Save the post, optionally into a specific directory
    Save(Option<PathBuf>),
    /// Start over
    Reset,
    /// Show the current phase and data
    State,
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a trimmed, non-empty input line
    pub fn parse(input: &str) -> Self {
        let Some(rest) = input.strip_prefix('/') else {
            return Self::Titles(input.to_string());
        };

        let (cmd, arg) = match rest.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (rest, ""),
        };

        match cmd {
            "titles" | "t" => Self::Titles(arg.to_string()),
            "select" | "s" => Self::Select(arg.to_string()),
            "post" | "p" => Self::Post,
            "show" => Self::Show,
            "view" | "v" => Self::View,
            "save" | "download" => Self::Save((!arg.is_empty()).then(|| PathBuf::from(arg))),
            "reset" | "r" => Self::Reset,
            "state" => Self::State,
            "help" | "h" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => Self::Unknown(format!("/{}", cmd)),
        }
    }
}
