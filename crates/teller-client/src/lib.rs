//! teller-client: wire client for the support assistant service
//!
//! One request/response exchange per user message: POST the utterance with
//! a session id, get the assistant's reply text back. No streaming, no
//! persistent connection.

pub mod client;
pub mod error;
pub mod types;

pub use client::ChatClient;
pub use error::{Error, Result};
pub use types::{ChatReply, ChatRequest};
