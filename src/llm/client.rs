//! Chat client abstraction and provider selection.
//!
//! The backend is opaque to the rest of the crate: a function from an
//! ordered message sequence to a single assistant response. It receives no
//! implicit memory of its own; all continuity comes from the replayed
//! transcript it is handed on each call.

use crate::types::{Message, Result};
use async_trait::async_trait;

#[cfg(not(feature = "ollama"))]
use crate::types::AppError;

/// Generic chat client trait for provider abstraction.
///
/// All backends implement this trait, allowing for easy swapping between
/// providers without changing application code.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Generate a single assistant response from the full message sequence.
    ///
    /// Fails with `ModelUnavailable`, `ModelTimeout`, or `ModelRefused`;
    /// all three leave persisted state untouched.
    async fn generate(&self, messages: &[Message]) -> Result<String>;

    /// Get the model name/identifier, for logging.
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime backend selection.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Ollama local LLM provider.
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::Ollama {
    ///     base_url: "http://localhost:11434".to_string(),
    ///     model: "llama3:latest".to_string(),
    /// };
    /// ```
    Ollama {
        /// Base URL of the Ollama server.
        base_url: String,
        /// Model tag to run, e.g. `llama3:latest`.
        model: String,
    },
}

impl Provider {
    /// Create a client instance for this provider.
    ///
    /// # Errors
    ///
    /// Returns `ModelUnavailable` when the crate was built without the
    /// matching provider feature.
    pub async fn create_client(&self) -> Result<Box<dyn ChatClient>> {
        match self {
            #[cfg(feature = "ollama")]
            Provider::Ollama { base_url, model } => Ok(Box::new(
                super::ollama::OllamaClient::new(base_url, model.clone()),
            )),

            #[cfg(not(feature = "ollama"))]
            Provider::Ollama { model, .. } => Err(AppError::ModelUnavailable(format!(
                "built without the `ollama` feature; cannot serve model '{}'",
                model
            ))),
        }
    }

    /// Get a human-readable name for this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Ollama { .. } => "Ollama",
        }
    }
}
