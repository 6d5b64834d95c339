//! Seams for the optional external AI collaborator.
//!
//! The engine never speaks HTTP itself: remote suggestion and embedding
//! providers plug in behind these traits, and any failure behind them is
//! recoverable.

use tm2_model::{MappingExplanation, MappingSuggestion, RemoteSuggestion};

/// Remote suggestion provider consulted when the local table has no match.
pub trait SuggestionService {
    /// Request suggestions for free-text clinical input.
    ///
    /// Called at most once per search operation; the engine never retries.
    fn fetch_suggestions(&self, clinical_text: &str) -> anyhow::Result<Vec<RemoteSuggestion>>;

    /// Request a narrative explanation for one suggestion.
    ///
    /// Optional capability; the default implementation reports it as
    /// unsupported and the engine falls back to a local template.
    fn explain(&self, suggestion: &MappingSuggestion) -> anyhow::Result<MappingExplanation> {
        let _ = suggestion;
        anyhow::bail!("mapping explanations are not supported by this service")
    }
}

/// Provider of fixed-length embedding vectors for similarity scoring.
pub trait EmbeddingSource {
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;
}
