//! The message dispatcher: orchestrates one request/reply cycle at a time.

use std::sync::Arc;

use teller_client::ChatRequest;
use tokio::sync::broadcast;

use crate::{
    conversation::{ConversationStore, SessionId, Snapshot},
    events::{ChatEvent, IgnoreReason},
    transport::Transport,
};

/// Stock greeting seeded into every new conversation
pub const DEFAULT_GREETING: &str =
    "Hello! I am your banking assistant. How can I help you today?";

/// Fixed reply appended when the outbound exchange fails
pub const DEFAULT_FALLBACK_REPLY: &str =
    "Sorry, I couldn't reach the support service. Please try sending your message again.";

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Assistant greeting the conversation is seeded with
    pub greeting: String,
    /// Fixed assistant reply appended when an exchange fails
    pub fallback_reply: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }
}

/// Dispatcher phase. `Sending` covers the span between request issuance
/// and arrival of the reply or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Idle,
    Sending,
}

/// Outcome of a submit call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Input was blank or a request was already in flight; nothing changed
    Ignored,
    /// The cycle settled: one user entry and one assistant entry appended
    Completed,
}

/// Owns the conversation store and runs request/reply cycles against the
/// transport. The single writer: no other component mutates the transcript.
///
/// There is no error terminal state. A failed exchange is absorbed into a
/// synthetic assistant message and the machine returns to `Idle`, so the
/// conversation stays usable after any failure.
pub struct Dispatcher {
    config: DispatcherConfig,
    store: ConversationStore,
    transport: Arc<dyn Transport>,
    state: DispatcherState,
    event_tx: broadcast::Sender<ChatEvent>,
}

impl Dispatcher {
    /// Create a dispatcher with a freshly seeded conversation
    pub fn new(config: DispatcherConfig, transport: Arc<dyn Transport>) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        let store = ConversationStore::new(config.greeting.clone());
        Self {
            config,
            store,
            transport,
            state: DispatcherState::Idle,
            event_tx,
        }
    }

    /// Subscribe to dispatch events
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.event_tx.subscribe()
    }

    /// Current state of the dispatch state machine
    pub fn state(&self) -> DispatcherState {
        self.state
    }

    /// The dispatcher config
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// The session id tagging outbound requests
    pub fn session_id(&self) -> &SessionId {
        self.store.session_id()
    }

    /// Immutable view of the conversation for rendering
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Run one submit cycle.
    ///
    /// Blank input and re-entrant calls while a request is in flight are
    /// ignored. Otherwise the raw text is appended to the transcript, sent
    /// to the service, and exactly one assistant entry (the reply or the
    /// fallback) is appended before this returns.
    pub async fn submit(&mut self, raw_text: &str) -> Submission {
        if raw_text.trim().is_empty() {
            let _ = self.event_tx.send(ChatEvent::SubmitIgnored {
                reason: IgnoreReason::EmptyInput,
            });
            return Submission::Ignored;
        }

        // Guards duplicate UI events racing an in-flight exchange
        if self.state == DispatcherState::Sending || self.store.awaiting_reply() {
            tracing::debug!("submit ignored: a request is already in flight");
            let _ = self.event_tx.send(ChatEvent::SubmitIgnored {
                reason: IgnoreReason::RequestInFlight,
            });
            return Submission::Ignored;
        }

        self.state = DispatcherState::Sending;
        // The raw text goes into the transcript and onto the wire untrimmed
        let _ = self.store.append_user_message(raw_text);
        let _ = self.event_tx.send(ChatEvent::SubmitStart {
            text: raw_text.to_string(),
        });

        let request = ChatRequest {
            session_id: self.store.session_id().to_string(),
            text: raw_text.to_string(),
        };

        match self.transport.send(request).await {
            Ok(reply) => {
                self.store.append_assistant_message(&reply.response);
                let _ = self.event_tx.send(ChatEvent::ReplyReceived {
                    text: reply.response,
                });
            }
            Err(e) => {
                tracing::warn!("dispatch failed: {}", e);
                self.store.append_assistant_message(&self.config.fallback_reply);
                let _ = self.event_tx.send(ChatEvent::DispatchFailed {
                    reason: e.to_string(),
                });
            }
        }

        self.state = DispatcherState::Idle;
        Submission::Completed
    }
}
