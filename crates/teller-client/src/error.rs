//! Error types for teller-client

use thiserror::Error;

/// Result type alias using teller-client Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during an exchange with the assistant service
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (connect, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Service answered with a non-success status
    #[error("service returned status {code}")]
    Status { code: u16 },
}

impl Error {
    /// Check if this failure was a client-side timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }
}
