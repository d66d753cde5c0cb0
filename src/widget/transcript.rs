//! Append-only message transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who a transcript message is rendered as coming from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the widget.
    User,
    /// The automated assistant.
    Bot,
}

/// A single rendered chat bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message originator.
    pub sender: Sender,
    /// Message text, rendered verbatim.
    pub text: String,
}

impl Message {
    /// Build a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    /// Build a bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

/// Ordered, append-only message list.
///
/// Messages are never mutated, removed, or reordered once appended; the
/// visible chat history is a faithful log of the conversation.
#[derive(Debug)]
pub struct Transcript {
    messages: Vec<Message>,
    started_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// Create an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            messages: Vec::new(),
            started_at: now,
            last_activity: now,
        }
    }

    /// Append a message to the end of the transcript.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.last_activity = Utc::now();
    }

    /// All messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether any bot message has been appended yet.
    #[must_use]
    pub fn has_bot_message(&self) -> bool {
        self.messages.iter().any(|m| m.sender == Sender::Bot)
    }

    /// When the transcript was created.
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When a message was last appended.
    #[must_use]
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }
}
