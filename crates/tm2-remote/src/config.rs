//! Client configuration.

use std::time::Duration;

/// Configuration for the remote suggestion service.
///
/// The timeout has no default; callers supply the bound explicitly.
/// Exceeding it is treated the same as a transport failure.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the service (e.g. `https://ai.example.org/mapping`).
    pub endpoint: String,
    /// Bearer token for the service, if it requires one.
    pub api_key: Option<String>,
    /// Hard bound on every request issued by the client.
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Configuration with a mandatory endpoint and timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout,
        }
    }

    /// Attach an API key sent as a bearer token.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}
