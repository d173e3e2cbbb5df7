//! # mnemo - conversational memory engine
//!
//! A session-scoped conversational memory engine for chat-completion
//! backends: it persists per-session message transcripts and replays them,
//! in order, as context on every model invocation, so the model can
//! reference earlier context (a stated name or preference).
//!
//! The "memory" is deliberately simple: an append-only transcript replayed
//! verbatim on each call. No summarization, no truncation, no windowing —
//! the history store is the single source of truth and the runner holds no
//! cross-call cache.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mnemo::{ConversationRunner, HistoryProvider, Provider};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = HistoryProvider::File { dir: "./data/sessions".into() }
//!         .create_store()
//!         .await?;
//!
//!     let client = Provider::Ollama {
//!         base_url: "http://localhost:11434".to_string(),
//!         model: "llama3:latest".to_string(),
//!     }
//!     .create_client()
//!     .await?;
//!
//!     let runner = ConversationRunner::new(Arc::from(store), Arc::from(client));
//!
//!     runner.converse("u1", "My favorite color is blue.").await?;
//!     let reply = runner.converse("u1", "What is my favorite color?").await?;
//!     println!("{}", reply); // references "blue"
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Guarantees
//!
//! - **Replay fidelity**: every call sends the backend exactly the turns
//!   persisted by prior successful calls, in append order, plus the new
//!   user message.
//! - **Atomic no-op on backend failure**: a failed or timed-out model call
//!   persists nothing, so a retry presents identical history.
//! - **Session isolation**: transcripts never leak across session ids.
//! - **Per-session serialization**: concurrent calls on one session are
//!   serialized; different sessions run concurrently.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `ollama` | Ollama local inference (default) |

#![warn(missing_docs)]

/// CLI output helpers.
pub mod cli;
/// Environment-based configuration.
pub mod config;
/// Session-keyed conversation history storage.
pub mod history;
/// Chat-completion backend clients.
pub mod llm;
/// The load -> generate -> append conversation cycle.
pub mod runner;
/// Core types (messages, errors).
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use history::{FileHistoryStore, HistoryProvider, HistoryStore, SessionInfo, SqliteHistoryStore};
pub use llm::{ChatClient, Provider};
pub use runner::ConversationRunner;
pub use types::{AppError, Message, MessageRole, Result};
