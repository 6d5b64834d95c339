//! Error types for the remote suggestion service client.
//!
//! Every variant is recoverable by contract: the engine downgrades remote
//! failures to its generic fallback instead of surfacing them.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteError {
    /// Transport-level failure (DNS, connect, TLS, read).
    #[error("network error: {0}")]
    Network(String),

    /// The configured request timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}")]
    Api { status: u16 },

    /// The response body could not be interpreted.
    #[error("unparseable service response: {0}")]
    Parse(String),
}

impl RemoteError {
    /// True when the failure was the bounded timeout elapsing.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias for remote operations.
pub type Result<T> = std::result::Result<T, RemoteError>;
