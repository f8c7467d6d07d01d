//! Transport abstraction between the dispatcher and the assistant service

use async_trait::async_trait;
use teller_client::{ChatClient, ChatReply, ChatRequest, Result};

/// One request/response exchange with the assistant service.
///
/// Exactly two outcomes: a reply or a failure. The dispatcher never
/// cancels an exchange once it is issued.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one user utterance and wait for the reply
    async fn send(&self, request: ChatRequest) -> Result<ChatReply>;
}

/// Production transport backed by the HTTP wire client
pub struct ClientTransport {
    client: ChatClient,
}

impl ClientTransport {
    /// Create a transport around a configured wire client
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ClientTransport {
    async fn send(&self, request: ChatRequest) -> Result<ChatReply> {
        self.client.send(&request).await
    }
}
