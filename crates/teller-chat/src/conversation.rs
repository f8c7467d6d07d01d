//! Conversation state: the transcript aggregate and its single-writer store.

use serde::{Deserialize, Serialize};

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Role and text are fixed at creation; position in
/// the transcript is arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    /// Assistant text may carry lightweight markup; user text is plain
    pub text: String,
    /// Unix millis at creation. Informational only, never affects ordering.
    pub timestamp: i64,
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Opaque identifier generated once per widget instance, used only to tag
/// outbound requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh id. The `user_` prefix matches the id shape the
    /// assistant service keys its threads on.
    pub fn generate() -> Self {
        Self(format!("user_{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable view of the conversation for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub messages: Vec<Message>,
    /// True between a user append and the matching assistant append
    pub awaiting_reply: bool,
}

/// The conversation aggregate: an append-only transcript plus the
/// awaiting-reply flag.
///
/// Mutating operations are crate-private so only the dispatcher can call
/// them; everything else observes the conversation through [`Snapshot`]s.
#[derive(Debug)]
pub struct ConversationStore {
    session_id: SessionId,
    messages: Vec<Message>,
    awaiting_reply: bool,
}

impl ConversationStore {
    /// Create a store seeded with the assistant greeting
    pub(crate) fn new(greeting: impl Into<String>) -> Self {
        Self {
            session_id: SessionId::generate(),
            messages: vec![Message::assistant(greeting)],
            awaiting_reply: false,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Immutable view of the current state; side-effect free
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            messages: self.messages.clone(),
            awaiting_reply: self.awaiting_reply,
        }
    }

    /// Append a user entry and raise the awaiting-reply flag.
    ///
    /// Blank input (after trimming) is rejected and the store is left
    /// untouched; otherwise the raw, untrimmed text is recorded and the
    /// updated snapshot returned.
    pub(crate) fn append_user_message(&mut self, text: &str) -> Option<Snapshot> {
        if text.trim().is_empty() {
            return None;
        }
        self.messages.push(Message::user(text));
        self.awaiting_reply = true;
        Some(self.snapshot())
    }

    /// Append an assistant entry and clear the awaiting-reply flag
    pub(crate) fn append_assistant_message(&mut self, text: &str) {
        self.messages.push(Message::assistant(text));
        self.awaiting_reply = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_has_greeting_only() {
        let store = ConversationStore::new("Hello!");
        assert_eq!(store.messages().len(), 1);
        assert_eq!(store.messages()[0].role, Role::Assistant);
        assert_eq!(store.messages()[0].text, "Hello!");
        assert!(!store.awaiting_reply());
    }

    #[test]
    fn test_append_user_sets_awaiting() {
        let mut store = ConversationStore::new("hi");
        let snapshot = store.append_user_message("What is my balance?").unwrap();
        assert!(snapshot.awaiting_reply);
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[1].role, Role::User);
    }

    #[test]
    fn test_append_user_keeps_raw_text() {
        let mut store = ConversationStore::new("hi");
        store.append_user_message("  padded  ").unwrap();
        assert_eq!(store.messages()[1].text, "  padded  ");
    }

    #[test]
    fn test_blank_user_message_rejected() {
        let mut store = ConversationStore::new("hi");
        assert!(store.append_user_message("   \t\n").is_none());
        assert_eq!(store.messages().len(), 1);
        assert!(!store.awaiting_reply());
    }

    #[test]
    fn test_assistant_append_clears_awaiting() {
        let mut store = ConversationStore::new("hi");
        store.append_user_message("hello").unwrap();
        store.append_assistant_message("hello back");
        assert!(!store.awaiting_reply());
        assert_eq!(store.messages().len(), 3);
        assert_eq!(store.messages()[2].role, Role::Assistant);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = ConversationStore::new("hi");
        let before = store.snapshot();
        store.append_user_message("hello").unwrap();
        // The earlier snapshot is unaffected by later mutation
        assert_eq!(before.messages.len(), 1);
        assert!(!before.awaiting_reply);
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("user_"));
    }
}
