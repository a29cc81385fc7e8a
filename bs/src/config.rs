//! Blogsmith configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Startup configuration problems; any of these halts the program
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Unknown LLM provider '{0}'. Supported: groq, openai")]
    UnknownProvider(String),

    #[error("LLM API key not found. Set the {0} environment variable (or add it to .env).")]
    MissingApiKey(String),

    #[error("{section}.temperature must be within 0.0..=2.0, got {value}")]
    TemperatureOutOfRange { section: &'static str, value: f32 },

    #[error("{section}.max-tokens must be positive")]
    ZeroMaxTokens { section: &'static str },
}

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Sampling settings per prompt kind
    pub generation: GenerationConfig,

    /// Where saved posts go
    pub output: OutputConfig,

    /// Log level (overridden by --log-level)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks the provider, sampling ranges and that the credential variable
    /// is set. Call this at startup to fail fast with a clear error message.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.llm.is_supported_provider() {
            return Err(ConfigError::UnknownProvider(self.llm.provider.clone()));
        }
        self.generation.titles.validate("generation.titles")?;
        self.generation.post.validate("generation.post")?;

        if self.llm.api_key().is_none() {
            return Err(ConfigError::MissingApiKey(self.llm.api_key_env.clone()));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // Explicit path: failures are fatal
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::search_paths() {
            if candidate.exists() {
                match Self::load_from_file(&candidate) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", candidate.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level, before logging is initialized
    ///
    /// Errors are swallowed here; the full `load` reports them afterwards.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let paths = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::search_paths(),
        };
        paths
            .iter()
            .filter(|p| p.exists())
            .find_map(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    /// Project-local `.blogsmith.yml`, then `~/.config/blogsmith/blogsmith.yml`
    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".blogsmith.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("blogsmith").join("blogsmith.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("groq" or "openai")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL (the client appends /v1/chat/completions)
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: "llama3-8b-8192".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            base_url: "https://api.groq.com/openai".to_string(),
            timeout_ms: 60_000,
        }
    }
}

impl LlmConfig {
    /// Providers that speak the OpenAI chat completions API
    pub const SUPPORTED_PROVIDERS: &'static [&'static str] = &["groq", "openai"];

    pub fn is_supported_provider(&self) -> bool {
        Self::SUPPORTED_PROVIDERS.contains(&self.provider.as_str())
    }

    /// Read the API key from the environment; blank values count as missing
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok().filter(|k| !k.trim().is_empty())
    }
}

/// Sampling settings for the two prompt kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub titles: SamplingConfig,
    pub post: SamplingConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            titles: SamplingConfig {
                temperature: 0.7,
                max_tokens: 300,
            },
            post: SamplingConfig {
                temperature: 0.8,
                max_tokens: 3000,
            },
        }
    }
}

/// Temperature and output budget for one completion call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub temperature: f32,

    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,
}

impl SamplingConfig {
    fn validate(&self, section: &'static str) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::TemperatureOutOfRange {
                section,
                value: self.temperature,
            });
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::ZeroMaxTokens { section });
        }
        Ok(())
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that `/save` writes posts into
    pub dir: PathBuf,

    /// Directory searched for prompt template overrides
    #[serde(rename = "prompts-dir")]
    pub prompts_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            prompts_dir: PathBuf::from(".blogsmith/prompts"),
        }
    }
}
