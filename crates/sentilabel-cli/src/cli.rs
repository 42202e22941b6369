use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sentilabel_ai::RetryPolicy;
use sentilabel_ai::groq::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, GroqConfig};
use sentilabel_core::config::DEFAULT_CONCURRENCY;
use sentilabel_core::{ConfigError, DEFAULT_CHUNK_SIZE, PipelineConfig};
use tracing::Level;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Per-file tables with counts
    Table,
    /// One JSON document for all files
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "sentilabel",
    author,
    version,
    about = "Label the sentiment of every text in .txt, .json, .csv and .xlsx files"
)]
pub struct Cli {
    /// Files to classify
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Oracle API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat-completions base URL
    #[arg(long, env = "GROQ_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Model identifier
    #[arg(long, env = "SENTILABEL_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature (0.0 to 2.0; lower is more deterministic)
    #[arg(long, env = "SENTILABEL_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Records per oracle call
    #[arg(long, env = "SENTILABEL_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Oracle calls in flight per file
    #[arg(long, env = "SENTILABEL_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-call timeout in seconds
    #[arg(long, env = "SENTILABEL_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Retries for rate-limited or failed calls
    #[arg(long, env = "SENTILABEL_MAX_RETRIES", default_value_t = 2)]
    pub max_retries: u32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Warnings and errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn groq_config(&self) -> anyhow::Result<GroqConfig> {
        let api_key = self
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .context("no API key: set GROQ_API_KEY (environment or .env) or pass --api-key")?;
        Ok(GroqConfig {
            api_key,
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
        })
    }

    pub fn pipeline_config(&self) -> Result<PipelineConfig, ConfigError> {
        PipelineConfig::new(self.chunk_size, self.concurrency)
    }

    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "timeout must be at least 1 second".into(),
            ));
        }
        Ok(Duration::from_secs(self.timeout_secs))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_max_retries(self.max_retries)
    }

    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }
}
