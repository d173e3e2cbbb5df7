//! Session-keyed conversation history storage.
//!
//! This module owns the durable side of conversational memory: an
//! append-only transcript per session, replayed in full on every model
//! call. Backends:
//! - **JSONL files** (default): one human-inspectable file per session
//! - **Embedded SQLite**: a single database file via libsql
//!
//! Select a backend via [`HistoryProvider`]; everything downstream works
//! against the [`HistoryStore`] trait.

pub mod file;
pub mod sqlite;
pub mod traits;

pub use file::FileHistoryStore;
pub use sqlite::SqliteHistoryStore;
pub use traits::{HistoryProvider, HistoryStore, SessionInfo};
