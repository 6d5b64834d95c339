//! Keyword matching over the static mapping table.

use tm2_model::MappingEntry;
use tm2_terminology::MappingTable;

/// One table entry that matched the query, with the keywords that hit.
#[derive(Debug, Clone)]
pub struct KeywordMatch<'a> {
    /// The matched table entry.
    pub entry: &'a MappingEntry,
    /// Position of the entry in the table, used as the ranking tie-breaker.
    pub table_index: usize,
    /// Keywords found in the query, in keyword-table order.
    pub matched_keywords: Vec<String>,
}

/// Returns the entries with at least one keyword occurring in `query`.
///
/// A keyword matches when the lowercased query contains it as a substring;
/// there is no token-boundary awareness, so recall wins over precision on
/// the instant-feedback path. Results are ordered by descending prior
/// confidence, ties in table order.
pub fn keyword_matches<'a>(query: &str, table: &'a MappingTable) -> Vec<KeywordMatch<'a>> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let lowered = query.to_lowercase();
    let mut matches = Vec::new();
    for (table_index, entry) in table.entries().iter().enumerate() {
        let matched_keywords: Vec<String> = entry
            .keywords
            .iter()
            .filter(|keyword| lowered.contains(keyword.as_str()))
            .cloned()
            .collect();
        if !matched_keywords.is_empty() {
            matches.push(KeywordMatch {
                entry,
                table_index,
                matched_keywords,
            });
        }
    }
    // Stable sort: equal confidences keep table order.
    matches.sort_by(|a, b| b.entry.base_confidence.cmp(&a.entry.base_confidence));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm2_model::SourceSystem;

    fn entry(category: &str, keywords: &[&str], confidence: u8) -> MappingEntry {
        MappingEntry {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            source_code: format!("AAA-{}", confidence),
            source_term: category.to_string(),
            source_term_english: category.to_string(),
            source_system: SourceSystem::Ayurveda,
            target_code: "XM0001".to_string(),
            target_term: category.to_string(),
            base_confidence: confidence,
        }
    }

    fn table(entries: Vec<MappingEntry>) -> MappingTable {
        MappingTable::from_entries(entries).expect("valid test table")
    }

    #[test]
    fn empty_and_whitespace_queries_match_nothing() {
        let table = table(vec![entry("fever", &["fever"], 90)]);
        assert!(keyword_matches("", &table).is_empty());
        assert!(keyword_matches("   \t ", &table).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let table = table(vec![entry("fever", &["fever", "jwara"], 90)]);
        let matches = keyword_matches("Patient reports HIGH FEVER since morning", &table);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_keywords, vec!["fever"]);
    }

    #[test]
    fn matched_keywords_keep_keyword_table_order() {
        let table = table(vec![entry("resp", &["breathing", "cough", "asthma"], 90)]);
        let matches = keyword_matches("asthma with cough and breathing trouble", &table);
        assert_eq!(
            matches[0].matched_keywords,
            vec!["breathing", "cough", "asthma"]
        );
    }

    #[test]
    fn results_order_by_confidence_then_table_order() {
        let table = table(vec![
            entry("low", &["pain"], 60),
            entry("first", &["pain"], 85),
            entry("second", &["pain"], 85),
        ]);
        let matches = keyword_matches("joint pain", &table);
        let categories: Vec<&str> = matches
            .iter()
            .map(|m| m.entry.category.as_str())
            .collect();
        assert_eq!(categories, vec!["first", "second", "low"]);
        assert_eq!(matches[1].table_index, 2);
    }
}
