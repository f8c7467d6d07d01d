//! teller-chat: conversation state and message dispatch
//!
//! This crate owns the transcript of a support conversation and drives one
//! request/reply cycle at a time against the remote assistant service.
//! Rendering consumes snapshots only; the dispatcher is the single writer.

pub mod conversation;
pub mod dispatcher;
pub mod events;
pub mod transport;

pub use conversation::{ConversationStore, Message, Role, SessionId, Snapshot};
pub use dispatcher::{
    DEFAULT_FALLBACK_REPLY, DEFAULT_GREETING, Dispatcher, DispatcherConfig, DispatcherState,
    Submission,
};
pub use events::{ChatEvent, IgnoreReason};
pub use transport::{ClientTransport, Transport};
