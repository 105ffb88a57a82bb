use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Assistant topic, one independent chat history per topic: the general
/// travel guide ("Virtual TL") and the umrah guide ("Virtual Muthawif").
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChatTopic {
    General,
    Umrah,
}

impl ChatTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatTopic::General => "general",
            ChatTopic::Umrah => "umrah",
        }
    }
}

impl FromStr for ChatTopic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(ChatTopic::General),
            "umrah" => Ok(ChatTopic::Umrah),
            other => Err(format!("Unknown assistant topic: {}", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        ChatMessage { role: ChatRole::User, text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        ChatMessage { role: ChatRole::Assistant, text: text.into() }
    }
}

/// Append-only in-memory message list. Session-only: no persistence and no
/// truncation of the stored history (the prompt context built from it is
/// bounded separately).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}
