//! Dispatch event types

use serde::{Deserialize, Serialize};

/// Why a submission was dropped without touching the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The trimmed input was empty
    EmptyInput,
    /// A request/reply cycle is already in flight
    RequestInFlight,
}

/// Events emitted while the dispatcher works a request/reply cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A user message was accepted and the outbound request is going out
    SubmitStart { text: String },

    /// The service replied and the assistant message was appended
    ReplyReceived { text: String },

    /// The exchange failed; the fallback reply was appended instead
    DispatchFailed { reason: String },

    /// A submission was dropped without starting a cycle
    SubmitIgnored { reason: IgnoreReason },
}

impl ChatEvent {
    /// Check if this event settles a submit cycle
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            ChatEvent::ReplyReceived { .. } | ChatEvent::DispatchFailed { .. }
        )
    }
}
