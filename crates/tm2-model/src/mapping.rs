//! Mapping types shared between the terminology table and the engine.
//!
//! `MappingEntry` is one row of the static keyword table; `MappingSuggestion`
//! is the value object the engine hands back to callers for each candidate
//! NAMASTE to ICD-11 mapping.

use serde::{Deserialize, Serialize};

use crate::system::SourceSystem;

/// One row of the static keyword mapping table.
///
/// Entries are read-only after load: the table is validated once at startup
/// and never mutated for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Category key, unique across the table (e.g. "respiratory").
    pub category: String,
    /// Lowercase trigger keywords, in authoring order. Never empty.
    pub keywords: Vec<String>,
    /// NAMASTE diagnostic code (e.g. "AAA-2.1").
    pub source_code: String,
    /// Term in the original language of the source system.
    pub source_term: String,
    /// English rendering of the source term.
    pub source_term_english: String,
    /// Traditional-medicine system the entry belongs to.
    pub source_system: SourceSystem,
    /// Mapped ICD-11/TM2 code (e.g. "XM4567").
    pub target_code: String,
    /// Display text for the target code.
    pub target_term: String,
    /// Authorial prior confidence for this mapping, 0-100.
    pub base_confidence: u8,
}

/// A candidate mapping produced for one query.
///
/// Owned by the caller that requested it; the engine keeps no reference to
/// suggestions after returning them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingSuggestion {
    /// Category of the originating table entry, when the suggestion came
    /// from the local table. Remote and generic suggestions carry `None`.
    pub category: Option<String>,
    /// Keywords from the entry found in the query, in keyword-table order.
    pub matched_keywords: Vec<String>,
    pub source_code: String,
    pub source_term: String,
    pub source_term_english: String,
    pub source_system: SourceSystem,
    pub target_code: String,
    pub target_term: String,
    /// Word-overlap score, 0-100. `None` when no local breakdown exists.
    pub lexical_score: Option<u8>,
    /// Embedding-similarity score, 0-100. `None` when no local breakdown exists.
    pub semantic_score: Option<u8>,
    /// Final ranking score, 0-100.
    pub combined_score: u8,
    /// Free-text rationale, supplied by the remote service or the generic
    /// fallback.
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_serializes_round_trip() {
        let suggestion = MappingSuggestion {
            category: Some("respiratory".to_string()),
            matched_keywords: vec!["cough".to_string()],
            source_code: "AAA-2.1".to_string(),
            source_term: "प्राणवातकोप".to_string(),
            source_term_english: "Disturbance of Prana Vata".to_string(),
            source_system: SourceSystem::Ayurveda,
            target_code: "XM4567".to_string(),
            target_term: "Respiratory dysfunction".to_string(),
            lexical_score: Some(40),
            semantic_score: Some(80),
            combined_score: 68,
            description: None,
        };
        let json = serde_json::to_string(&suggestion).expect("serialize suggestion");
        let round: MappingSuggestion = serde_json::from_str(&json).expect("deserialize suggestion");
        assert_eq!(round.source_code, "AAA-2.1");
        assert_eq!(round.combined_score, 68);
        assert_eq!(round.source_system, SourceSystem::Ayurveda);
    }

    #[test]
    fn entry_rejects_missing_fields() {
        let result = serde_json::from_str::<MappingEntry>(r#"{"category": "fever"}"#);
        assert!(result.is_err());
    }
}
