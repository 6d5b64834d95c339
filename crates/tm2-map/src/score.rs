//! Similarity scoring for candidate mappings.
//!
//! Combines a Jaccard word-overlap score with a cosine similarity over
//! embedding vectors into a single confidence percentage. Embeddings come
//! from a pluggable [`EmbeddingSource`]; without one (or when the source
//! fails) a deterministic word-frequency bag stands in. The fallback is a
//! reproducibility placeholder, not a real semantic model.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use tm2_model::MappingEntry;

use crate::service::EmbeddingSource;

/// Weight of the word-overlap component in the combined score.
pub const LEXICAL_WEIGHT: f64 = 0.3;
/// Weight of the embedding-similarity component in the combined score.
pub const SEMANTIC_WEIGHT: f64 = 0.7;
/// Dimension of the local fallback embedding.
pub const EMBEDDING_DIM: usize = 100;

/// Score components for one (query, entry) pair, as integer percentages.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreBreakdown {
    pub lexical: u8,
    pub semantic: u8,
    pub combined: u8,
}

/// Request-scoped score cache for one search operation.
///
/// Keyed by entry category so the embedding source is consulted at most
/// once per (query, entry) pair within a single search. Created per call,
/// never shared across queries.
#[derive(Debug, Default)]
pub struct ScoreCache {
    query_vector: Option<Vec<f32>>,
    scores: BTreeMap<String, ScoreBreakdown>,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Scores (query, entry) pairs against an optional embedding source.
pub struct Scorer<'a> {
    embedding_source: Option<&'a dyn EmbeddingSource>,
}

impl<'a> Scorer<'a> {
    /// Scorer using only the deterministic local embedding.
    pub fn local() -> Scorer<'static> {
        Scorer {
            embedding_source: None,
        }
    }

    /// Scorer backed by an external embedding source, with local fallback.
    pub fn with_source(source: &'a dyn EmbeddingSource) -> Self {
        Self {
            embedding_source: Some(source),
        }
    }

    /// Compute (or fetch from `cache`) the score for one pair.
    pub fn score(
        &self,
        query: &str,
        entry: &MappingEntry,
        cache: &mut ScoreCache,
    ) -> ScoreBreakdown {
        if let Some(hit) = cache.scores.get(&entry.category) {
            return *hit;
        }
        let lexical = lexical_similarity(query, &entry.source_term_english);
        if cache.query_vector.is_none() {
            cache.query_vector = Some(self.embed(query));
        }
        let entry_vector = self.embed(&entry.source_term_english);
        let semantic = match &cache.query_vector {
            Some(query_vector) => cosine_similarity(query_vector, &entry_vector),
            None => 0.0,
        };
        let combined = (LEXICAL_WEIGHT * lexical + SEMANTIC_WEIGHT * semantic).clamp(0.0, 1.0);
        let breakdown = ScoreBreakdown {
            lexical: to_percent(lexical),
            semantic: to_percent(semantic),
            combined: to_percent(combined),
        };
        cache.scores.insert(entry.category.clone(), breakdown);
        breakdown
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        if let Some(source) = self.embedding_source {
            match source.embed(text) {
                Ok(vector) if !vector.is_empty() => return vector,
                Ok(_) => debug!("embedding source returned an empty vector"),
                Err(error) => debug!(error = %error, "embedding source failed"),
            }
        }
        local_embedding(text)
    }
}

/// Jaccard similarity between the word sets of two texts, in [0,1].
///
/// Defined as 0 when both word sets are empty.
pub fn lexical_similarity(left: &str, right: &str) -> f64 {
    let left_words = word_set(left);
    let right_words = word_set(right);
    if left_words.is_empty() && right_words.is_empty() {
        return 0.0;
    }
    let intersection = left_words.intersection(&right_words).count();
    let union = left_words.union(&right_words).count();
    intersection as f64 / union as f64
}

/// Cosine similarity between two vectors, clamped to [0,1].
///
/// Defined as 0 for length-mismatched vectors and when either vector is
/// all zeros.
pub fn cosine_similarity(left: &[f32], right: &[f32]) -> f64 {
    if left.len() != right.len() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut left_norm = 0.0f64;
    let mut right_norm = 0.0f64;
    for (a, b) in left.iter().zip(right) {
        dot += f64::from(*a) * f64::from(*b);
        left_norm += f64::from(*a) * f64::from(*a);
        right_norm += f64::from(*b) * f64::from(*b);
    }
    if left_norm == 0.0 || right_norm == 0.0 {
        return 0.0;
    }
    (dot / (left_norm.sqrt() * right_norm.sqrt())).clamp(0.0, 1.0)
}

/// Deterministic word-frequency embedding over a fixed-size bag.
///
/// Words are case-folded, tokenized on non-alphanumeric boundaries and
/// sorted; the first [`EMBEDDING_DIM`] distinct words contribute their
/// counts. Order-independent and reproducible for identical input.
pub fn local_embedding(text: &str) -> Vec<f32> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for word in words(text) {
        *counts.entry(word).or_insert(0) += 1;
    }
    let mut embedding = vec![0.0f32; EMBEDDING_DIM];
    for (slot, count) in embedding.iter_mut().zip(counts.values()) {
        *slot = *count as f32;
    }
    embedding
}

fn word_set(text: &str) -> BTreeSet<String> {
    words(text).collect()
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

fn to_percent(value: f64) -> u8 {
    (value * 100.0).round() as u8
}
