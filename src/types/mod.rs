//! Core types: conversation messages and the crate-wide error taxonomy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============= Conversation Types =============

/// A single conversational turn.
///
/// Messages are immutable once created; their position in a session is
/// determined by append order, not by `timestamp`, which is informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who produced this turn.
    pub role: MessageRole,
    /// Text payload, UTF-8, unbounded length.
    pub content: String,
    /// Creation time. Ordering authority stays with append order.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a user turn stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Build an assistant turn stamped with the current time.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Build a system framing turn. System turns are sent to the backend
    /// but never persisted to a session transcript.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Fixed framing injected at generation time; not persisted.
    System,
    /// The human side of the conversation.
    User,
    /// The model side of the conversation.
    Assistant,
}

impl MessageRole {
    /// Wire/storage representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }

    /// Parse a stored role string. Unknown roles are a storage-format
    /// violation, so the caller decides how to surface them.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "system" => Some(MessageRole::System),
            "user" => Some(MessageRole::User),
            "assistant" => Some(MessageRole::Assistant),
            _ => None,
        }
    }
}

// ============= Error Types =============

/// Crate-wide error taxonomy.
///
/// Every failure surfaces as a distinct kind so callers can decide whether
/// to retry (backend faults), alert an operator (storage faults), or fix
/// the request (input faults). The crate never retries internally.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The persistence medium is unreachable or refused the operation.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Persisted data exists but cannot be parsed. Never silently dropped:
    /// losing turns would break the session's memory guarantee.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// The model backend is unreachable or returned an error.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The model backend did not answer within the configured deadline.
    #[error("model timed out: {0}")]
    ModelTimeout(String),

    /// The model backend declined to produce a response.
    #[error("model refused: {0}")]
    ModelRefused(String),

    /// The caller supplied an empty or malformed argument; rejected before
    /// any store or backend access.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// True for persistence-layer faults (`StorageUnavailable`,
    /// `MalformedRecord`).
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AppError::StorageUnavailable(_) | AppError::MalformedRecord(_)
        )
    }

    /// True for backend faults (`ModelUnavailable`, `ModelTimeout`,
    /// `ModelRefused`). These leave persisted state unchanged.
    pub fn is_model(&self) -> bool {
        matches!(
            self,
            AppError::ModelUnavailable(_) | AppError::ModelTimeout(_) | AppError::ModelRefused(_)
        )
    }

    /// True when the same call can be retried against identical state.
    /// Backend faults never touch the transcript, so a retry presents the
    /// model with exactly the history the failed call saw.
    pub fn is_retryable(&self) -> bool {
        self.is_model()
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            assert_eq!(MessageRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(MessageRole::parse("tool"), None);
    }

    #[test]
    fn test_message_serde_uses_lowercase_roles() {
        let msg = Message::user("hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"user\""));

        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back.role, MessageRole::User);
        assert_eq!(back.content, "hello");
    }

    #[test]
    fn test_error_classification() {
        assert!(AppError::StorageUnavailable("down".into()).is_storage());
        assert!(AppError::MalformedRecord("bad".into()).is_storage());
        assert!(!AppError::StorageUnavailable("down".into()).is_retryable());

        assert!(AppError::ModelUnavailable("down".into()).is_retryable());
        assert!(AppError::ModelTimeout("slow".into()).is_retryable());
        assert!(AppError::ModelRefused("no".into()).is_retryable());

        assert!(!AppError::InvalidInput("empty".into()).is_model());
        assert!(!AppError::InvalidInput("empty".into()).is_storage());
    }
}
