//! Conversational assistant: two independent chat histories (general guide
//! and umrah muthawif) with optimistic user-message append and serialized
//! sends.
//!
//! The assistant holds the session state machine only; the actual
//! generation call happens between `begin_send` and `complete_send` so no
//! lock is held across the network await. A failure of any kind becomes a
//! synthetic in-chat assistant message rather than blocking the chat.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use log::warn;

use crate::models::chat::{ChatHistory, ChatMessage, ChatTopic};
use crate::services::generation::GenerationError;
use crate::services::prompt_builder::assistant_instruction;

pub type SendToken = u64;

/// The stored history is unbounded (session-only), but the prompt context
/// built from it is capped at the most recent messages.
const PROMPT_CONTEXT_MESSAGES: usize = 50;

const NOT_CONFIGURED_REPLY: &str =
    "Maaf, asisten belum dikonfigurasi. Hubungi penyedia aplikasi.";
const FAILURE_REPLY: &str =
    "Maaf, asisten sedang tidak dapat menjawab. Silakan coba lagi.";

#[derive(Debug)]
pub enum SendError {
    /// A send for this topic is already pending; rejected, not queued.
    Busy,
    EmptyMessage,
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Busy => write!(f, "A message is already being answered"),
            SendError::EmptyMessage => write!(f, "Message text is empty"),
        }
    }
}

impl Error for SendError {}

#[derive(Debug)]
pub enum AssistantFailure {
    NotConfigured,
    Generation(GenerationError),
}

#[derive(Debug, Default)]
struct ChatSession {
    history: ChatHistory,
    /// Token of the send awaiting completion, if any.
    pending: Option<SendToken>,
}

#[derive(Debug)]
pub struct Assistant {
    sessions: HashMap<ChatTopic, ChatSession>,
    next_token: SendToken,
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new()
    }
}

impl Assistant {
    pub fn new() -> Self {
        Self { sessions: HashMap::new(), next_token: 1 }
    }

    pub fn history(&self, topic: ChatTopic) -> &[ChatMessage] {
        self.sessions
            .get(&topic)
            .map(|session| session.history.messages())
            .unwrap_or(&[])
    }

    pub fn is_loading(&self, topic: ChatTopic) -> bool {
        self.sessions
            .get(&topic)
            .map(|s| s.pending.is_some())
            .unwrap_or(false)
    }

    /// Append the user message optimistically, mark the topic loading, and
    /// return the completion prompt to send alongside the send's token.
    /// Rejected while a send for the same topic is pending; the token must
    /// accompany the completion (or the abort, if the reply never arrives).
    pub fn begin_send(
        &mut self,
        topic: ChatTopic,
        text: &str,
    ) -> Result<(SendToken, String), SendError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SendError::EmptyMessage);
        }

        let session = self.sessions.entry(topic).or_default();
        if session.pending.is_some() {
            return Err(SendError::Busy);
        }

        session.history.push(ChatMessage::user(text));
        let token = self.next_token;
        self.next_token += 1;
        session.pending = Some(token);

        Ok((token, build_chat_prompt(topic, &session.history)))
    }

    /// Append the reply -- or a synthetic in-chat error message on any
    /// failure -- and clear the loading flag. Only the completion matching
    /// the pending token is applied; a stale one is dropped and `None` is
    /// returned.
    pub fn complete_send(
        &mut self,
        topic: ChatTopic,
        token: SendToken,
        reply: Result<String, AssistantFailure>,
    ) -> Option<ChatMessage> {
        let session = self.sessions.entry(topic).or_default();
        if session.pending != Some(token) {
            warn!("dropping stale assistant reply for token {}", token);
            return None;
        }
        session.pending = None;

        let message = match reply {
            Ok(text) => ChatMessage::assistant(text.trim().to_string()),
            Err(AssistantFailure::NotConfigured) => {
                warn!("assistant reply skipped: generation service not configured");
                ChatMessage::assistant(NOT_CONFIGURED_REPLY)
            }
            Err(AssistantFailure::Generation(err)) => {
                warn!("assistant reply failed: {}", err);
                ChatMessage::assistant(FAILURE_REPLY)
            }
        };

        session.history.push(message.clone());
        Some(message)
    }

    /// Clear a pending send whose completion will never arrive (the caller
    /// was dropped mid-generation). The optimistic user message stays in
    /// the history; the topic accepts new sends again. A no-op unless the
    /// token is the pending one.
    pub fn abort_send(&mut self, topic: ChatTopic, token: SendToken) {
        let Some(session) = self.sessions.get_mut(&topic) else {
            return;
        };
        if session.pending == Some(token) {
            warn!("assistant send {} abandoned before a reply arrived", token);
            session.pending = None;
        }
    }
}

/// Fixed per-topic instruction plus the running transcript, bounded to the
/// most recent messages. No schema is imposed on the reply.
fn build_chat_prompt(topic: ChatTopic, history: &ChatHistory) -> String {
    let messages = history.messages();
    let start = messages.len().saturating_sub(PROMPT_CONTEXT_MESSAGES);

    let mut prompt = String::from(assistant_instruction(topic));
    prompt.push_str("\n\n");
    for message in &messages[start..] {
        let speaker = match message.role {
            crate::models::chat::ChatRole::User => "Pengguna",
            crate::models::chat::ChatRole::Assistant => "Asisten",
        };
        prompt.push_str(speaker);
        prompt.push_str(": ");
        prompt.push_str(&message.text);
        prompt.push('\n');
    }
    prompt.push_str("Asisten:");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_instruction_and_transcript() {
        let mut assistant = Assistant::new();
        let (_, prompt) = assistant
            .begin_send(ChatTopic::General, "Apa oleh-oleh khas Bali?")
            .unwrap();
        assert!(prompt.starts_with(assistant_instruction(ChatTopic::General)));
        assert!(prompt.contains("Pengguna: Apa oleh-oleh khas Bali?"));
        assert!(prompt.ends_with("Asisten:"));
    }

    #[test]
    fn empty_message_rejected_without_append() {
        let mut assistant = Assistant::new();
        assert!(matches!(
            assistant.begin_send(ChatTopic::General, "   "),
            Err(SendError::EmptyMessage)
        ));
        assert!(assistant.history(ChatTopic::General).is_empty());
    }
}
