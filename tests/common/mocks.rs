//! Mock chat clients for testing.
//!
//! These mocks stand in for the model backend so tests can exercise the
//! runner and stores without any network dependencies.

#![allow(dead_code)]

use async_trait::async_trait;
use mnemo::{AppError, ChatClient, Message, MessageRole, Result};
use parking_lot::Mutex;
use std::time::Duration;

/// Which backend fault a mock should simulate.
#[derive(Debug, Clone, Copy)]
pub enum MockFault {
    Unavailable,
    Timeout,
    Refused,
}

impl MockFault {
    fn into_error(self) -> AppError {
        match self {
            MockFault::Unavailable => AppError::ModelUnavailable("mock backend down".to_string()),
            MockFault::Timeout => AppError::ModelTimeout("mock backend timed out".to_string()),
            MockFault::Refused => AppError::ModelRefused("mock backend refused".to_string()),
        }
    }
}

/// Mock chat client with a fixed response.
///
/// Records every message sequence it receives, so tests can assert exactly
/// what context the backend was handed on each call.
pub struct MockChatClient {
    response: String,
    fault: Option<MockFault>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl MockChatClient {
    /// Create a mock that always answers with `response`.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            fault: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always fails with the given fault.
    pub fn failing(fault: MockFault) -> Self {
        Self {
            response: String::new(),
            fault: Some(fault),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every message sequence this mock has received, in call order.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn generate(&self, messages: &[Message]) -> Result<String> {
        self.requests.lock().push(messages.to_vec());
        if let Some(fault) = self.fault {
            return Err(fault.into_error());
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Mock that answers recall questions by scanning the replayed history,
/// mimicking a model that actually uses its context.
pub struct RecallChatClient;

#[async_trait]
impl ChatClient for RecallChatClient {
    async fn generate(&self, messages: &[Message]) -> Result<String> {
        let mut color = None;
        let mut name = None;
        for m in messages.iter().filter(|m| m.role == MessageRole::User) {
            if let Some(rest) = m.content.strip_prefix("My favorite color is ") {
                color = Some(rest.trim_end_matches('.').to_string());
            }
            if let Some(rest) = m.content.strip_prefix("My name is ") {
                name = Some(rest.trim_end_matches('.').to_string());
            }
        }

        let question = messages
            .last()
            .map(|m| m.content.to_lowercase())
            .unwrap_or_default();
        if question.contains("favorite color") && question.ends_with('?') {
            return Ok(match color {
                Some(c) => format!("Your favorite color is {}.", c),
                None => "You haven't told me your favorite color yet.".to_string(),
            });
        }
        if question.contains("my name") && question.ends_with('?') {
            return Ok(match name {
                Some(n) => format!("Your name is {}.", n),
                None => "You haven't told me your name yet.".to_string(),
            });
        }
        Ok("Okay.".to_string())
    }

    fn model_name(&self) -> &str {
        "recall-mock"
    }
}

/// Mock that sleeps before answering, for timeout tests.
pub struct SlowChatClient {
    pub delay: Duration,
}

#[async_trait]
impl ChatClient for SlowChatClient {
    async fn generate(&self, _messages: &[Message]) -> Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok("slow response".to_string())
    }

    fn model_name(&self) -> &str {
        "slow-mock"
    }
}
