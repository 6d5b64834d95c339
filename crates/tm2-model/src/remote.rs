//! Wire types for the external AI suggestion service.
//!
//! Field names follow the service contract (camelCase, NAMASTE/ICD-11
//! terminology) rather than the engine's internal naming; the orchestrator
//! converts these into [`MappingSuggestion`](crate::MappingSuggestion)s.

use serde::{Deserialize, Serialize};

/// One suggestion record as returned by the remote service.
///
/// Same shape as a `MappingSuggestion` minus the score breakdown: the
/// service supplies a single confidence value which the engine adopts as
/// the combined score directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSuggestion {
    pub namaste_code: String,
    pub namaste_term: String,
    pub english_term: String,
    /// System name as free text; parsed leniently at the engine boundary.
    pub system: String,
    pub icd11_code: String,
    pub icd11_term: String,
    /// Confidence percentage, 0-100.
    pub confidence: u8,
    #[serde(default)]
    pub description: Option<String>,
}

/// A narrative explanation of one mapping, for reviewer-facing display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingExplanation {
    /// Why the mapping makes medical sense.
    pub rationale: String,
    /// Plain-language description of the target condition.
    pub layman_explanation: String,
    /// How the traditional concept relates to the ICD-11 equivalent.
    pub comparison: String,
    /// Confidence percentage, 0-100.
    pub confidence: u8,
    /// Suggested next steps for the reviewing clinician.
    pub recommendations: Vec<String>,
}
