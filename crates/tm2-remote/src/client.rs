//! HTTP client for the remote suggestion service.
//!
//! One request per engine search, bounded by the configured timeout.
//! Retry policy belongs to the caller; the engine treats any failure here
//! as a signal to fall back, not to try again.

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde_json::json;
use tracing::debug;

use tm2_map::{EmbeddingSource, SuggestionService};
use tm2_model::{MappingExplanation, MappingSuggestion, RemoteSuggestion};

use crate::config::RemoteConfig;
use crate::error::{RemoteError, Result};
use crate::parse::{parse_embeddings, parse_explanation, parse_suggestions};

/// Blocking client for the suggestion, embedding and explanation endpoints.
#[derive(Clone)]
pub struct RemoteClient {
    config: RemoteConfig,
    client: Client,
}

impl RemoteClient {
    /// Build a client; the configured timeout applies to every request.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RemoteError::from)?;
        Ok(Self { config, client })
    }

    fn suggestions_url(&self) -> String {
        format!("{}/suggestions", self.base_url())
    }

    fn embeddings_url(&self) -> String {
        format!("{}/embeddings", self.base_url())
    }

    fn explanations_url(&self) -> String {
        format!("{}/explanations", self.base_url())
    }

    fn base_url(&self) -> &str {
        self.config.endpoint.trim_end_matches('/')
    }

    fn post(&self, url: &str, body: serde_json::Value) -> Result<String> {
        let mut request = self
            .client
            .post(url)
            .header(
                USER_AGENT,
                format!("tm2-bridge/{}", env!("CARGO_PKG_VERSION")),
            )
            .json(&body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Api {
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }

    /// Request mapping suggestions for free-text clinical input.
    pub fn suggestions(&self, clinical_text: &str) -> Result<Vec<RemoteSuggestion>> {
        debug!(url = %self.suggestions_url(), "requesting remote suggestions");
        let body = self.post(
            &self.suggestions_url(),
            json!({ "clinicalText": clinical_text }),
        )?;
        parse_suggestions(&body)
    }

    /// Request an embedding vector for a text.
    pub fn embeddings(&self, text: &str) -> Result<Vec<f32>> {
        debug!(url = %self.embeddings_url(), "requesting remote embedding");
        let body = self.post(&self.embeddings_url(), json!({ "text": text }))?;
        parse_embeddings(&body)
    }

    /// Request a narrative explanation for one suggestion.
    pub fn explanation(&self, suggestion: &MappingSuggestion) -> Result<MappingExplanation> {
        debug!(url = %self.explanations_url(), "requesting remote explanation");
        let payload = serde_json::to_value(suggestion)
            .map_err(|err| RemoteError::Parse(err.to_string()))?;
        let body = self.post(&self.explanations_url(), payload)?;
        parse_explanation(&body)
    }
}

impl SuggestionService for RemoteClient {
    fn fetch_suggestions(&self, clinical_text: &str) -> anyhow::Result<Vec<RemoteSuggestion>> {
        Ok(self.suggestions(clinical_text)?)
    }

    fn explain(&self, suggestion: &MappingSuggestion) -> anyhow::Result<MappingExplanation> {
        Ok(self.explanation(suggestion)?)
    }
}

impl EmbeddingSource for RemoteClient {
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        Ok(self.embeddings(text)?)
    }
}
