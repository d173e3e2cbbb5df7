//! Conversation orchestration.
//!
//! [`ConversationRunner`] turns one `(session_id, user_text)` pair into a
//! model response while maintaining the append-only transcript invariant:
//! load the session history, replay it to the backend with the new user
//! turn, and persist the completed round trip. A failed or timed-out
//! backend call persists nothing, so a retry presents identical history.

use crate::history::HistoryStore;
use crate::llm::ChatClient;
use crate::types::{AppError, Message, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(120);

/// Orchestrates the load -> generate -> append cycle for each call.
///
/// Construct one runner per backend/store pair and share it by reference;
/// it holds no per-call state and no cross-call message cache. The history
/// store remains the single source of truth, so multiple runner instances
/// or processes can share a session as long as store access is serialized
/// per session.
pub struct ConversationRunner {
    store: Arc<dyn HistoryStore>,
    client: Arc<dyn ChatClient>,
    system_prompt: Option<String>,
    model_timeout: Duration,
    // One async mutex per session: at most one in-flight
    // load-generate-append cycle per session_id. Different sessions
    // proceed concurrently.
    session_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ConversationRunner {
    /// Create a runner over the given store and backend client.
    pub fn new(store: Arc<dyn HistoryStore>, client: Arc<dyn ChatClient>) -> Self {
        Self {
            store,
            client,
            system_prompt: None,
            model_timeout: DEFAULT_MODEL_TIMEOUT,
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Set a fixed system framing sent on every call, never persisted.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the deadline for a single backend call.
    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }

    /// Run one conversational turn in `session_id`.
    ///
    /// On success both the user turn and the assistant response are
    /// appended to the session, in that order, and the response text is
    /// returned. On a backend fault (`ModelUnavailable`, `ModelTimeout`,
    /// `ModelRefused`) nothing is persisted. Store faults surface as
    /// `StorageUnavailable` / `MalformedRecord`, distinct from backend
    /// faults.
    pub async fn converse(&self, session_id: &str, user_text: &str) -> Result<String> {
        if session_id.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "session_id must not be empty".to_string(),
            ));
        }
        if user_text.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "user_text must not be empty".to_string(),
            ));
        }

        let lock = self.session_lock(session_id);
        let _guard = lock.lock().await;

        let history = self.store.load(session_id).await?;
        debug!(session_id, turns = history.len(), "loaded session history");

        let user_message = Message::user(user_text);
        let mut outbound = Vec::with_capacity(history.len() + 2);
        if let Some(prompt) = &self.system_prompt {
            outbound.push(Message::system(prompt.clone()));
        }
        outbound.extend(history);
        outbound.push(user_message.clone());

        let response =
            match tokio::time::timeout(self.model_timeout, self.client.generate(&outbound)).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(AppError::ModelTimeout(format!(
                        "no response from '{}' within {:?}",
                        self.client.model_name(),
                        self.model_timeout
                    )));
                }
            };

        self.store.append(session_id, &user_message).await?;
        self.store
            .append(session_id, &Message::assistant(response.clone()))
            .await?;
        debug!(session_id, "persisted conversation turn");

        Ok(response)
    }

    fn session_lock(&self, session_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.session_locks
            .lock()
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }
}
