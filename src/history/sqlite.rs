//! Embedded SQLite history store via libsql.
//!
//! Messages live in a single `messages` table; per-session ordering is the
//! autoincrement `seq` column, so replay order is append order regardless
//! of clock behavior.

use crate::history::traits::{HistoryStore, SessionInfo};
use crate::types::{AppError, Message, MessageRole, Result};
use async_trait::async_trait;
use libsql::{Builder, Connection, Database};

/// History store backed by an embedded SQLite database.
pub struct SqliteHistoryStore {
    db: Database,
}

impl SqliteHistoryStore {
    /// Open (or create) a database file at `path`.
    pub async fn new_local(path: &str) -> Result<Self> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::StorageUnavailable(format!(
                        "failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| {
                AppError::StorageUnavailable(format!("failed to open database {}: {}", path, e))
            })?;

        let store = Self { db };
        store.initialize_schema().await?;
        Ok(store)
    }

    /// Open an ephemeral in-memory database.
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                AppError::StorageUnavailable(format!("failed to open in-memory database: {}", e))
            })?;

        let store = Self { db };
        store.initialize_schema().await?;
        Ok(store)
    }

    fn connection(&self) -> Result<Connection> {
        self.db
            .connect()
            .map_err(|e| AppError::StorageUnavailable(format!("failed to get connection: {}", e)))
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS messages (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                timestamp INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| {
            AppError::StorageUnavailable(format!("failed to create messages table: {}", e))
        })?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_messages_session ON messages(session_id, seq)",
            (),
        )
        .await
        .map_err(|e| {
            AppError::StorageUnavailable(format!("failed to create session index: {}", e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn load(&self, session_id: &str) -> Result<Vec<Message>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT role, content, timestamp FROM messages
                 WHERE session_id = ? ORDER BY seq ASC",
                [session_id],
            )
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("failed to query messages: {}", e)))?;

        let mut messages = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?
        {
            let role_str: String = row
                .get(0)
                .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
            let role = MessageRole::parse(&role_str).ok_or_else(|| {
                AppError::MalformedRecord(format!(
                    "session '{}': unknown role '{}'",
                    session_id, role_str
                ))
            })?;
            let content: String = row
                .get(1)
                .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
            let ts: i64 = row
                .get(2)
                .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
            let timestamp = chrono::DateTime::from_timestamp(ts, 0).ok_or_else(|| {
                AppError::MalformedRecord(format!(
                    "session '{}': timestamp {} out of range",
                    session_id, ts
                ))
            })?;

            messages.push(Message {
                role,
                content,
                timestamp,
            });
        }

        Ok(messages)
    }

    async fn append(&self, session_id: &str, message: &Message) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "INSERT INTO messages (session_id, role, content, timestamp)
             VALUES (?, ?, ?, ?)",
            (
                session_id,
                message.role.as_str(),
                message.content.as_str(),
                message.timestamp.timestamp(),
            ),
        )
        .await
        .map_err(|e| AppError::StorageUnavailable(format!("failed to append message: {}", e)))?;

        Ok(())
    }

    async fn sessions(&self) -> Result<Vec<SessionInfo>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT session_id, COUNT(*) FROM messages
                 GROUP BY session_id ORDER BY session_id ASC",
                (),
            )
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("failed to query sessions: {}", e)))?;

        let mut sessions = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?
        {
            let id: String = row
                .get(0)
                .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
            let count: i64 = row
                .get(1)
                .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
            sessions.push(SessionInfo {
                id,
                message_count: count as usize,
            });
        }

        Ok(sessions)
    }

    async fn clear(&self, session_id: &str) -> Result<()> {
        let conn = self.connection()?;

        conn.execute("DELETE FROM messages WHERE session_id = ?", [session_id])
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("failed to clear session: {}", e)))?;

        Ok(())
    }
}
