//! JSONL-backed history store.
//!
//! Each session maps to a file `{dir}/{sanitized_id}.jsonl` where every
//! line is one JSON-serialized [`Message`]. The trailing newline is the
//! commit marker for an append: an unterminated final line is an
//! uncommitted write and is skipped on load, while a terminated line that
//! fails to parse surfaces as `MalformedRecord`.

use crate::history::traits::{HistoryStore, SessionInfo};
use crate::types::{AppError, Message, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Persistent history store backed by one JSONL file per session.
pub struct FileHistoryStore {
    dir: PathBuf,
}

impl FileHistoryStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            AppError::StorageUnavailable(format!(
                "failed to create session directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self { dir })
    }

    fn session_path(&self, session_id: &str) -> PathBuf {
        self.dir.join(format!("{}.jsonl", sanitize_id(session_id)))
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn load(&self, session_id: &str) -> Result<Vec<Message>> {
        let path = self.session_path(session_id);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::StorageUnavailable(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let (committed, tail) = split_committed(&content);
        if !tail.trim().is_empty() {
            tracing::warn!(
                session_id,
                path = %path.display(),
                "skipping unterminated trailing line (uncommitted append)"
            );
        }

        let mut messages = Vec::new();
        for (line_num, line) in committed.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let message = serde_json::from_str::<Message>(line).map_err(|e| {
                AppError::MalformedRecord(format!(
                    "{} line {}: {}",
                    path.display(),
                    line_num + 1,
                    e
                ))
            })?;
            messages.push(message);
        }

        Ok(messages)
    }

    async fn append(&self, session_id: &str, message: &Message) -> Result<()> {
        let path = self.session_path(session_id);
        let mut line = serde_json::to_string(message).map_err(|e| {
            AppError::StorageUnavailable(format!("failed to serialize message: {}", e))
        })?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| {
                AppError::StorageUnavailable(format!("failed to open {}: {}", path.display(), e))
            })?;

        file.write_all(line.as_bytes()).await.map_err(|e| {
            AppError::StorageUnavailable(format!("failed to append to {}: {}", path.display(), e))
        })?;
        file.sync_data().await.map_err(|e| {
            AppError::StorageUnavailable(format!("failed to sync {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    async fn sessions(&self) -> Result<Vec<SessionInfo>> {
        let mut sessions = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            AppError::StorageUnavailable(format!(
                "failed to read session directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            AppError::StorageUnavailable(format!("failed to list sessions: {}", e))
        })? {
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "jsonl") {
                continue;
            }
            let id = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) if !stem.is_empty() => stem.to_string(),
                _ => continue,
            };

            let content = tokio::fs::read_to_string(&path).await.unwrap_or_default();
            let (committed, _) = split_committed(&content);
            let message_count = committed.lines().filter(|l| !l.trim().is_empty()).count();

            sessions.push(SessionInfo { id, message_count });
        }

        sessions.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(sessions)
    }

    async fn clear(&self, session_id: &str) -> Result<()> {
        let path = self.session_path(session_id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StorageUnavailable(format!(
                "failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Split file content at the last newline: everything up to and including
/// it is committed; anything after is an interrupted append.
fn split_committed(content: &str) -> (&str, &str) {
    match content.rfind('\n') {
        Some(idx) => content.split_at(idx + 1),
        None => ("", content),
    }
}

/// Sanitize a session id for safe use as a filename.
/// Replaces non-alphanumeric characters (except `_` and `-`) with `_`.
fn sanitize_id(session_id: &str) -> String {
    session_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_id_replaces_special_chars() {
        assert_eq!(sanitize_id("user_123"), "user_123");
        assert_eq!(sanitize_id("team/alice@home"), "team_alice_home");
        assert_eq!(sanitize_id("../escape"), "___escape");
    }

    #[test]
    fn test_split_committed() {
        assert_eq!(split_committed("a\nb\n"), ("a\nb\n", ""));
        assert_eq!(split_committed("a\npartial"), ("a\n", "partial"));
        assert_eq!(split_committed("partial"), ("", "partial"));
        assert_eq!(split_committed(""), ("", ""));
    }

    #[tokio::test]
    async fn test_append_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileHistoryStore::new(dir.path()).unwrap();

        store
            .append("s1", &Message::user("hello"))
            .await
            .unwrap();
        store
            .append("s1", &Message::assistant("hi there"))
            .await
            .unwrap();

        let loaded = store.load("s1").await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].role, MessageRole::User);
        assert_eq!(loaded[0].content, "hello");
        assert_eq!(loaded[1].role, MessageRole::Assistant);
        assert_eq!(loaded[1].content, "hi there");
    }

    #[tokio::test]
    async fn test_load_never_seen_session_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileHistoryStore::new(dir.path()).unwrap();

        assert!(store.load("never-seen").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unterminated_tail_is_skipped() {
        let dir = TempDir::new().unwrap();
        let store = FileHistoryStore::new(dir.path()).unwrap();
        store.append("s1", &Message::user("kept")).await.unwrap();

        // Simulate a crash mid-append: a second record without its newline.
        let path = dir.path().join("s1.jsonl");
        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("{\"role\":\"assistant\",\"conte");
        std::fs::write(&path, content).unwrap();

        let loaded = store.load("s1").await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].content, "kept");
    }

    #[tokio::test]
    async fn test_malformed_committed_line_surfaces() {
        let dir = TempDir::new().unwrap();
        let store = FileHistoryStore::new(dir.path()).unwrap();

        std::fs::write(dir.path().join("s1.jsonl"), "not json\n").unwrap();

        let err = store.load("s1").await.unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord(_)));
    }

    #[tokio::test]
    async fn test_clear_unknown_session_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = FileHistoryStore::new(dir.path()).unwrap();

        store.clear("nothing-here").await.unwrap();
    }
}
