//! Suggestion orchestration.
//!
//! `SuggestionEngine::suggest` walks a fixed sequence of states for every
//! call: empty input, local keyword match, one optional remote call, then a
//! generic fallback. Runtime failures never escape the engine; callers
//! always receive a (possibly synthetic) suggestion list.

use std::cmp::Reverse;

use tracing::{debug, warn};

use tm2_model::{MappingEntry, MappingExplanation, MappingSuggestion, RemoteSuggestion, SourceSystem};
use tm2_terminology::MappingTable;

use crate::matcher::keyword_matches;
use crate::score::{ScoreBreakdown, ScoreCache, Scorer};
use crate::service::{EmbeddingSource, SuggestionService};
use crate::slot::SearchSlot;

/// Confidence assigned to the synthetic fallback suggestion.
const GENERIC_CONFIDENCE: u8 = 75;

/// Orchestrates keyword matching, scoring and remote fallback.
///
/// Holds the immutable mapping table for the lifetime of the engine; all
/// per-call state (score cache, match lists) is request-scoped.
pub struct SuggestionEngine {
    table: MappingTable,
    remote: Option<Box<dyn SuggestionService + Send + Sync>>,
    embeddings: Option<Box<dyn EmbeddingSource + Send + Sync>>,
}

impl SuggestionEngine {
    /// Create an engine over a validated mapping table.
    pub fn new(table: MappingTable) -> Self {
        Self {
            table,
            remote: None,
            embeddings: None,
        }
    }

    /// Attach a remote suggestion service for the fallback path.
    pub fn with_remote(mut self, service: Box<dyn SuggestionService + Send + Sync>) -> Self {
        self.remote = Some(service);
        self
    }

    /// Attach an embedding source for semantic scoring of local matches.
    pub fn with_embedding_source(
        mut self,
        source: Box<dyn EmbeddingSource + Send + Sync>,
    ) -> Self {
        self.embeddings = Some(source);
        self
    }

    /// The mapping table this engine ranks against.
    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Instant-feedback path: local keyword matches only.
    ///
    /// Never touches the network; semantic scores always come from the
    /// deterministic local embedding so results are reproducible while the
    /// user is still typing.
    pub fn local_match(&self, clinical_text: &str) -> Vec<MappingSuggestion> {
        let hits = keyword_matches(clinical_text, &self.table);
        rank(clinical_text, hits, &Scorer::local())
    }

    /// Full suggestion pipeline.
    ///
    /// Total for every string input: empty input yields an empty list, a
    /// failed or unconfigured remote fallback yields one generic
    /// low-confidence suggestion. Remote and transport errors are logged
    /// and downgraded, never propagated.
    pub fn suggest(&self, clinical_text: &str) -> Vec<MappingSuggestion> {
        if clinical_text.trim().is_empty() {
            return Vec::new();
        }

        let hits = keyword_matches(clinical_text, &self.table);
        if !hits.is_empty() {
            debug!(matches = hits.len(), "keyword table matched");
            let scorer = match &self.embeddings {
                Some(source) => Scorer::with_source(source.as_ref()),
                None => Scorer::local(),
            };
            return rank(clinical_text, hits, &scorer);
        }

        if let Some(remote) = &self.remote {
            match remote.fetch_suggestions(clinical_text) {
                Ok(records) => {
                    let suggestions = convert_remote(records);
                    if !suggestions.is_empty() {
                        debug!(suggestions = suggestions.len(), "using remote suggestions");
                        return suggestions;
                    }
                    debug!("remote service returned no usable suggestions");
                }
                Err(error) => {
                    warn!(error = %error, "remote suggestion call failed");
                }
            }
        }

        vec![generic_fallback()]
    }

    /// Run `suggest` under a slot ticket; returns `None` when a newer
    /// search superseded this one while it was in flight.
    pub fn suggest_superseding(
        &self,
        slot: &SearchSlot,
        clinical_text: &str,
    ) -> Option<Vec<MappingSuggestion>> {
        let ticket = slot.begin();
        let suggestions = self.suggest(clinical_text);
        if slot.is_current(ticket) {
            Some(suggestions)
        } else {
            debug!("search superseded, discarding result");
            None
        }
    }

    /// Narrative explanation for one suggestion.
    ///
    /// Uses the remote service when one is attached and capable; otherwise
    /// (or on any remote failure) renders a deterministic local template.
    pub fn explain(&self, suggestion: &MappingSuggestion) -> MappingExplanation {
        if let Some(remote) = &self.remote {
            match remote.explain(suggestion) {
                Ok(explanation) => return explanation,
                Err(error) => {
                    debug!(error = %error, "remote explanation unavailable");
                }
            }
        }
        local_explanation(suggestion)
    }
}

/// Score the matched entries and order them for presentation.
///
/// Final order is descending combined score; equal scores keep the
/// original table order.
fn rank(
    query: &str,
    hits: Vec<crate::matcher::KeywordMatch<'_>>,
    scorer: &Scorer<'_>,
) -> Vec<MappingSuggestion> {
    let mut cache = ScoreCache::new();
    let mut scored: Vec<(u8, usize, MappingSuggestion)> = hits
        .into_iter()
        .map(|hit| {
            let breakdown = scorer.score(query, hit.entry, &mut cache);
            let suggestion = suggestion_from_entry(hit.entry, hit.matched_keywords, breakdown);
            (breakdown.combined, hit.table_index, suggestion)
        })
        .collect();
    scored.sort_by_key(|(combined, table_index, _)| (Reverse(*combined), *table_index));
    scored
        .into_iter()
        .map(|(_, _, suggestion)| suggestion)
        .collect()
}

fn suggestion_from_entry(
    entry: &MappingEntry,
    matched_keywords: Vec<String>,
    score: ScoreBreakdown,
) -> MappingSuggestion {
    MappingSuggestion {
        category: Some(entry.category.clone()),
        matched_keywords,
        source_code: entry.source_code.clone(),
        source_term: entry.source_term.clone(),
        source_term_english: entry.source_term_english.clone(),
        source_system: entry.source_system,
        target_code: entry.target_code.clone(),
        target_term: entry.target_term.clone(),
        lexical_score: Some(score.lexical),
        semantic_score: Some(score.semantic),
        combined_score: score.combined,
        description: None,
    }
}

/// Convert remote records, skipping any with an unrecognized system.
fn convert_remote(records: Vec<RemoteSuggestion>) -> Vec<MappingSuggestion> {
    let mut suggestions = Vec::new();
    for record in records {
        let Ok(source_system) = record.system.parse::<SourceSystem>() else {
            debug!(system = %record.system, "skipping remote suggestion with unknown system");
            continue;
        };
        suggestions.push(MappingSuggestion {
            category: None,
            matched_keywords: Vec::new(),
            source_code: record.namaste_code,
            source_term: record.namaste_term,
            source_term_english: record.english_term,
            source_system,
            target_code: record.icd11_code,
            target_term: record.icd11_term,
            lexical_score: None,
            semantic_score: None,
            combined_score: record.confidence.min(100),
            description: record.description,
        });
    }
    suggestions
}

/// Synthetic suggestion returned when every other path came up empty.
///
/// Keeps the consumer rendering something distinguishable from "no match":
/// a single generic entry with a modest confidence.
fn generic_fallback() -> MappingSuggestion {
    MappingSuggestion {
        category: None,
        matched_keywords: Vec::new(),
        source_code: "GEN-1.1".to_string(),
        source_term: "सामान्य विकार".to_string(),
        source_term_english: "General health condition".to_string(),
        source_system: SourceSystem::Ayurveda,
        target_code: "XM0000".to_string(),
        target_term: "General health condition".to_string(),
        lexical_score: None,
        semantic_score: None,
        combined_score: GENERIC_CONFIDENCE,
        description: Some(
            "General traditional medicine condition based on the clinical text".to_string(),
        ),
    }
}

fn local_explanation(suggestion: &MappingSuggestion) -> MappingExplanation {
    MappingExplanation {
        rationale: format!(
            "This mapping connects the traditional medicine concept \"{}\" from the {} system \
             with the ICD-11 code {}. It rests on clinical similarity and alignment of \
             diagnostic criteria.",
            suggestion.source_term_english, suggestion.source_system, suggestion.target_code
        ),
        layman_explanation: format!(
            "The traditional medicine condition \"{}\" is similar to the modern medical \
             condition \"{}\". Both describe related health issues affecting similar body \
             systems.",
            suggestion.source_term_english, suggestion.target_term
        ),
        comparison: "Traditional medicine assesses the patient holistically, while ICD-11 \
                     provides standardized diagnostic codes for international healthcare \
                     communication. The mapping bridges both views of the same condition."
            .to_string(),
        confidence: suggestion.combined_score,
        recommendations: vec![
            "Consult both traditional and modern medicine practitioners".to_string(),
            "Review patient history for prior traditional and conventional treatments".to_string(),
            "Document the mapping for insurance and regulatory compliance".to_string(),
        ],
    }
}
