//! Environment-based configuration.
//!
//! Settings come from environment variables (with a `.env` file loaded
//! when present) and fall back to local-development defaults: a local
//! Ollama server and a JSONL session directory under `./data`.

use crate::history::HistoryProvider;
use crate::types::{AppError, Result};
use std::env;

/// Runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend model settings.
    pub llm: LlmConfig,
    /// History persistence settings.
    pub history: HistoryProvider,
    /// Conversation framing settings.
    pub chat: ChatConfig,
}

/// Model backend settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the Ollama server.
    pub ollama_url: String,
    /// Model tag to run.
    pub model: String,
    /// Deadline for a single backend call, in seconds.
    pub request_timeout_secs: u64,
}

/// Conversation framing settings.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Optional fixed system prompt sent on every call, never persisted.
    pub system_prompt: Option<String>,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Reads a `.env` file from the working directory when one exists.
    /// Unset variables fall back to defaults; unparseable values are
    /// input faults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            llm: LlmConfig {
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                model: env::var("MNEMO_MODEL").unwrap_or_else(|_| "llama3:latest".to_string()),
                request_timeout_secs: parse_var("MNEMO_MODEL_TIMEOUT_SECS", 120)?,
            },
            history: HistoryProvider::from_env()?,
            chat: ChatConfig {
                system_prompt: env::var("MNEMO_SYSTEM_PROMPT").ok().filter(|s| !s.is_empty()),
            },
        })
    }
}

fn parse_var(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| {
            AppError::InvalidInput(format!("{} must be an integer, got '{}'", name, value))
        }),
        Err(_) => Ok(default),
    }
}
