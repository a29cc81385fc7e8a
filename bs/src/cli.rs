//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

/// Blogsmith - keyword to blog post, one interactive session at a time
#[derive(Debug, Parser)]
#[command(
    name = "bs",
    about = "Generate blog title ideas from a keyword, pick one, and get a full markdown post",
    version,
    after_help = "Logs are written to: ~/.local/share/blogsmith/logs/blogsmith.log\n\
                  The API key is read from GROQ_API_KEY (or the configured api-key-env), \
                  including from a .env file in the current directory."
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Option<String>,

    /// Topic to generate titles for as soon as the session starts
    #[arg(value_name = "KEYWORD", num_args = 0.., trailing_var_arg = true)]
    pub keyword: Vec<String>,
}

impl Cli {
    /// The initial keyword, words joined with spaces
    pub fn initial_keyword(&self) -> Option<String> {
        let joined = self.keyword.join(" ");
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["bs"]);
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
        assert!(cli.initial_keyword().is_none());
    }

    #[test]
    fn test_cli_parse_keyword_words() {
        let cli = Cli::parse_from(["bs", "remote", "work", "productivity"]);
        assert_eq!(cli.initial_keyword().as_deref(), Some("remote work productivity"));
    }

    #[test]
    fn test_cli_parse_quoted_keyword() {
        let cli = Cli::parse_from(["bs", "remote work productivity"]);
        assert_eq!(cli.initial_keyword().as_deref(), Some("remote work productivity"));
    }

    #[test]
    fn test_cli_with_config_and_log_level() {
        let cli = Cli::parse_from(["bs", "-c", "/path/to/blogsmith.yml", "--log-level", "debug"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/blogsmith.yml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
