use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A message as one agent sees it in its history with a peer.
///
/// `role` is relative to the owning agent: `Assistant` for what it sent,
/// `User` for what it received. `name` is the agent that wrote the message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn new(name: impl Into<String>, content: Option<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            name: name.into(),
            content,
        }
    }

    pub fn new_text(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(name, Some(content.into()))
    }

    pub fn with_role(mut self, role: MessageRole) -> Self {
        self.role = role;
        self
    }

    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", content = "content")]
pub enum LLMMessage {
    #[serde(rename = "system")]
    System(String),
    #[serde(rename = "user")]
    User(String),
    #[serde(rename = "assistant")]
    Assistant(String),
}

pub fn chat_message_to_llm_message(msg: &ChatMessage) -> LLMMessage {
    let content = msg.text().to_string();
    match msg.role {
        MessageRole::User => LLMMessage::User(content),
        MessageRole::Assistant => LLMMessage::Assistant(content),
    }
}

pub fn chat_history_to_llm_messages(history: &[ChatMessage]) -> Vec<LLMMessage> {
    history.iter().map(chat_message_to_llm_message).collect()
}
