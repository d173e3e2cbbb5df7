use crate::llm::client::ChatClient;
use crate::types::{AppError, Message, MessageRole, Result};
use async_trait::async_trait;
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, request::ChatMessageRequest},
};

/// Chat client backed by a local Ollama server.
pub struct OllamaClient {
    client: Ollama,
    model: String,
}

impl OllamaClient {
    /// Build a client for the Ollama server at `base_url`.
    pub fn new(base_url: &str, model: String) -> Self {
        let (host, port) = parse_base_url(base_url);
        Self {
            client: Ollama::new(host, port),
            model,
        }
    }
}

/// Split a base URL like `http://localhost:11434` into host and port,
/// defaulting to localhost:11434 for anything unparseable.
fn parse_base_url(base_url: &str) -> (String, u16) {
    let url_parts: Vec<&str> = base_url.split("://").collect();
    if url_parts.len() == 2 {
        let host_port: Vec<&str> = url_parts[1].split(':').collect();
        let host = host_port[0].to_string();
        let port = if host_port.len() == 2 {
            host_port[1].parse().unwrap_or(11434)
        } else {
            11434
        };
        (host, port)
    } else {
        ("localhost".to_string(), 11434)
    }
}

#[async_trait]
impl ChatClient for OllamaClient {
    async fn generate(&self, messages: &[Message]) -> Result<String> {
        let chat_messages: Vec<ChatMessage> = messages
            .iter()
            .map(|m| match m.role {
                MessageRole::System => ChatMessage::system(m.content.clone()),
                MessageRole::User => ChatMessage::user(m.content.clone()),
                MessageRole::Assistant => ChatMessage::assistant(m.content.clone()),
            })
            .collect();

        let request = ChatMessageRequest::new(self.model.clone(), chat_messages);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| AppError::ModelUnavailable(format!("Ollama error: {}", e)))?;

        let content = response.message.content;
        if content.is_empty() {
            return Err(AppError::ModelRefused(format!(
                "model '{}' returned an empty response",
                self.model
            )));
        }

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
