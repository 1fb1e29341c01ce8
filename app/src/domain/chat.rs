//! Per-group chat transcripts.
//!
//! Transcripts live for the session only. Each room starts with the two
//! placeholder messages configured for its kind.

use chrono::{DateTime, Utc};

use super::community::GroupKind;

/// One chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Sequential id within the room, starting at 1.
    pub id: u64,
    /// Display name of the author.
    pub author: String,
    /// Message body.
    pub text: String,
    /// When the message was posted.
    pub timestamp: DateTime<Utc>,
}

/// Placeholder message used to seed a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    /// Author shown on the placeholder.
    pub author: String,
    /// Placeholder text.
    pub text: String,
}

impl Greeting {
    /// Convenience constructor.
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }
}

/// Placeholder messages per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatGreetings {
    club: Vec<Greeting>,
    event: Vec<Greeting>,
}

impl ChatGreetings {
    /// Build from explicit lists.
    pub fn new(club: Vec<Greeting>, event: Vec<Greeting>) -> Self {
        Self { club, event }
    }

    /// Placeholders for `kind`.
    pub fn for_kind(&self, kind: GroupKind) -> &[Greeting] {
        match kind {
            GroupKind::Club => &self.club,
            GroupKind::Event => &self.event,
        }
    }
}

/// Transcript for a single group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatRoom {
    messages: Vec<ChatMessage>,
}

impl ChatRoom {
    /// Start a room with the given placeholders, all stamped `opened_at`.
    pub fn seeded(greetings: &[Greeting], opened_at: DateTime<Utc>) -> Self {
        let mut room = Self::default();
        for greeting in greetings {
            room.push(&greeting.author, &greeting.text, opened_at);
        }
        room
    }

    fn push(&mut self, author: &str, text: &str, timestamp: DateTime<Utc>) {
        let id = self.messages.len() as u64 + 1;
        self.messages.push(ChatMessage {
            id,
            author: author.to_owned(),
            text: text.to_owned(),
            timestamp,
        });
    }

    /// Append a message. Returns `None` and appends nothing when `text` is
    /// blank once trimmed.
    pub fn post(
        &mut self,
        author: &str,
        text: &str,
        timestamp: DateTime<Utc>,
    ) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.push(author, text, timestamp);
        self.messages.last()
    }

    /// Messages in posting order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}
