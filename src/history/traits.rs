//! History store abstraction
//!
//! This module provides the `HistoryStore` trait that abstracts over the
//! persistence medium for session transcripts (JSONL files, embedded
//! SQLite), plus the `HistoryProvider` configuration enum for selecting a
//! backend at runtime.
//!
//! # Example
//!
//! ```rust,ignore
//! use mnemo::history::{HistoryProvider, HistoryStore};
//!
//! // One JSONL file per session (default)
//! let store = HistoryProvider::File { dir: "./data/sessions".into() }
//!     .create_store()
//!     .await?;
//!
//! // Embedded SQLite
//! let store = HistoryProvider::Sqlite { path: "./data/mnemo.db".into() }
//!     .create_store()
//!     .await?;
//! ```

use crate::types::{AppError, Message, Result};
use async_trait::async_trait;

/// History backend configuration.
#[derive(Debug, Clone)]
pub enum HistoryProvider {
    /// One JSONL transcript file per session under `dir`.
    File {
        /// Directory holding the per-session `.jsonl` files.
        dir: String,
    },
    /// Embedded SQLite database file.
    Sqlite {
        /// Path to the SQLite database file.
        path: String,
    },
    /// In-memory SQLite (ephemeral, lost on exit).
    Memory,
}

impl Default for HistoryProvider {
    fn default() -> Self {
        HistoryProvider::File {
            dir: "./data/sessions".to_string(),
        }
    }
}

impl HistoryProvider {
    /// Create a history store from this provider configuration.
    pub async fn create_store(&self) -> Result<Box<dyn HistoryStore>> {
        match self {
            HistoryProvider::File { dir } => {
                let store = super::file::FileHistoryStore::new(dir)?;
                Ok(Box::new(store))
            }
            HistoryProvider::Sqlite { path } => {
                let store = super::sqlite::SqliteHistoryStore::new_local(path).await?;
                Ok(Box::new(store))
            }
            HistoryProvider::Memory => {
                let store = super::sqlite::SqliteHistoryStore::new_memory().await?;
                Ok(Box::new(store))
            }
        }
    }

    /// Build a provider from `MNEMO_HISTORY_BACKEND` / `MNEMO_HISTORY_PATH`.
    ///
    /// Unset variables fall back to the file backend under
    /// `./data/sessions`; an unrecognized backend name is an input fault.
    pub fn from_env() -> Result<Self> {
        let backend = std::env::var("MNEMO_HISTORY_BACKEND").unwrap_or_else(|_| "file".to_string());
        let path = std::env::var("MNEMO_HISTORY_PATH").ok();

        match backend.to_lowercase().as_str() {
            "file" => Ok(HistoryProvider::File {
                dir: path.unwrap_or_else(|| "./data/sessions".to_string()),
            }),
            "sqlite" => Ok(HistoryProvider::Sqlite {
                path: path.unwrap_or_else(|| "./data/mnemo.db".to_string()),
            }),
            "memory" => Ok(HistoryProvider::Memory),
            other => Err(AppError::InvalidInput(format!(
                "unknown history backend '{}' (expected file, sqlite, or memory)",
                other
            ))),
        }
    }

    /// Human-readable backend name.
    pub fn name(&self) -> &'static str {
        match self {
            HistoryProvider::File { .. } => "file",
            HistoryProvider::Sqlite { .. } => "sqlite",
            HistoryProvider::Memory => "memory",
        }
    }
}

/// Summary of a stored session, without its messages.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    /// Caller-supplied session identifier.
    pub id: String,
    /// Number of persisted turns.
    pub message_count: usize,
}

/// Durable mapping from `session_id` to an ordered sequence of messages.
///
/// The store is intentionally dumb: no indexing, no compaction, no querying
/// beyond full-session replay. The conversation-memory use case only ever
/// needs "give me everything for this session, in order". The store owns
/// all persisted state; callers hold no cross-call message cache.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load all messages for a session in chronological order.
    ///
    /// Returns an empty sequence for a never-seen `session_id`; must not
    /// fail for a well-formed, previously-unused id.
    async fn load(&self, session_id: &str) -> Result<Vec<Message>>;

    /// Append a message to the end of the session's sequence.
    ///
    /// The write is durable once this returns: a subsequent [`load`] in the
    /// same or a later process observes it. A crash mid-write must not
    /// corrupt previously persisted messages.
    ///
    /// [`load`]: HistoryStore::load
    async fn append(&self, session_id: &str, message: &Message) -> Result<()>;

    /// Enumerate stored sessions, for operational use.
    async fn sessions(&self) -> Result<Vec<SessionInfo>>;

    /// Remove a session's transcript. Clearing an unknown session is a
    /// no-op.
    async fn clear(&self, session_id: &str) -> Result<()>;
}
