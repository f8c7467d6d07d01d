//! Wire types for the assistant service's /chat endpoint

use serde::{Deserialize, Serialize};

/// Outbound request body for one user utterance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Stable per-widget-instance identifier
    pub session_id: String,
    /// The raw user utterance
    pub text: String,
}

/// Success response body.
///
/// Deserialization fails if `response` is missing, which callers treat as a
/// dispatch failure like any other malformed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// The assistant's reply text; may carry lightweight markup
    pub response: String,
}
