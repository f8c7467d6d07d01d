//! HTTP client for the assistant service

use std::time::Duration;

use crate::{
    error::{Error, Result},
    types::{ChatReply, ChatRequest},
};

/// Client for the assistant service's single request/response endpoint
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
}

impl ChatClient {
    /// Create a client with no request timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a client that fails exchanges taking longer than `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// The configured service base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one message and wait for the reply
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatReply> {
        let url = format!("{}/chat", self.base_url.trim_end_matches('/'));
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                code: status.as_u16(),
            });
        }

        // Decode from the raw body so a malformed payload surfaces as a
        // JSON error rather than a transport error.
        let body = response.text().await?;
        let reply: ChatReply = serde_json::from_str(&body)?;
        Ok(reply)
    }
}
