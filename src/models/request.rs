use serde::{Deserialize, Serialize};

use super::message::{ChatMessage, Role};

/// Request body for the streaming chat endpoint
///
/// Serializes as `{"messages": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// Conversation so far, oldest first
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a request holding a single user message
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self::new().with_message(ChatMessage::user(prompt))
    }

    /// Append a message
    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// The most recent user message, if any
    pub fn last_user_message(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.role == Role::User)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Serialize to the JSON request body
    pub fn to_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
