//! The static keyword mapping table.
//!
//! The table is loaded once, validated eagerly, and never mutated
//! afterwards. Entry order is the file's authoring order and is significant:
//! the engine uses it as the deterministic tie-breaker when ranking
//! suggestions.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use tm2_model::{MappingEntry, SourceSystem};

use crate::error::TerminologyError;

/// Embedded default table, derived from the NAMASTE keyword catalogue.
const DEFAULT_TABLE_JSON: &str = include_str!("../data/default_mappings.json");

/// Validated, immutable keyword mapping table.
#[derive(Debug, Clone)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
}

impl MappingTable {
    /// Load and validate a table from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TerminologyError> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|source| TerminologyError::io(path, source))?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate a table from a JSON string.
    ///
    /// The format is a JSON array of entry objects. Validation rejects
    /// entries with no keywords, blank keywords, out-of-range confidence,
    /// and duplicate categories; keywords are lowercased on the way in.
    pub fn from_json_str(json: &str) -> Result<Self, TerminologyError> {
        let entries: Vec<MappingEntry> =
            serde_json::from_str(json).map_err(|source| TerminologyError::Parse { source })?;
        Self::from_entries(entries)
    }

    /// Validate an already-parsed list of entries.
    pub fn from_entries(mut entries: Vec<MappingEntry>) -> Result<Self, TerminologyError> {
        let mut seen = BTreeMap::new();
        for (index, entry) in entries.iter_mut().enumerate() {
            if entry.keywords.is_empty() {
                return Err(TerminologyError::EmptyKeywords {
                    category: entry.category.clone(),
                });
            }
            for keyword in &mut entry.keywords {
                let normalized = keyword.trim().to_lowercase();
                if normalized.is_empty() {
                    return Err(TerminologyError::BlankKeyword {
                        category: entry.category.clone(),
                    });
                }
                *keyword = normalized;
            }
            if entry.base_confidence > 100 {
                return Err(TerminologyError::ConfidenceOutOfRange {
                    category: entry.category.clone(),
                    value: entry.base_confidence,
                });
            }
            let key = entry.category.trim().to_lowercase();
            if seen.insert(key, index).is_some() {
                return Err(TerminologyError::DuplicateCategory {
                    category: entry.category.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// The compiled-in default table.
    ///
    /// # Panics
    ///
    /// Panics if the embedded data is malformed, which is a build defect
    /// rather than a runtime condition.
    pub fn builtin() -> Self {
        Self::from_json_str(DEFAULT_TABLE_JSON).expect("embedded mapping table is valid")
    }

    /// Entries in table order.
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Look up an entry by category, case-insensitively.
    pub fn get(&self, category: &str) -> Option<&MappingEntry> {
        self.entries
            .iter()
            .find(|entry| entry.category.eq_ignore_ascii_case(category))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Summary counts for reporting.
    pub fn stats(&self) -> TableStats {
        let mut by_system = BTreeMap::new();
        let mut keywords = 0;
        for entry in &self.entries {
            keywords += entry.keywords.len();
            *by_system.entry(entry.source_system).or_insert(0) += 1;
        }
        TableStats {
            entries: self.entries.len(),
            keywords,
            by_system,
        }
    }
}

/// Summary counts over a mapping table.
#[derive(Debug, Clone, Serialize)]
pub struct TableStats {
    /// Number of entries.
    pub entries: usize,
    /// Total keyword count across all entries.
    pub keywords: usize,
    /// Entry count per traditional-medicine system.
    pub by_system: BTreeMap<SourceSystem, usize>,
}
