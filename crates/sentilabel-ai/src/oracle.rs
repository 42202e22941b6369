use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    #[cfg(feature = "http")]
    #[error("oracle unavailable: {0}")]
    Http(#[from] reqwest::Error),
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
    #[error("oracle call timed out after {0:?}")]
    Timeout(Duration),
    #[error("oracle returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("oracle reply had no content")]
    EmptyReply,
    #[error("could not encode chunk payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl OracleError {
    /// Transport failures, timeouts, rate limits and server-side errors may
    /// succeed on a later attempt. Auth and request errors will not.
    pub fn is_retryable(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            Self::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Self::Unavailable(_) | Self::Timeout(_) => true,
            Self::Server { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            Self::EmptyReply | Self::Payload(_) => false,
        }
    }
}

/// A text-classification oracle: one system instruction plus one user
/// message in, one free-text reply out.
///
/// Implementations make exactly one remote call per invocation; timeouts
/// and retries are layered on by [`Classifier`](crate::Classifier).
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, OracleError>;
}
