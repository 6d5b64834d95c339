use std::sync::Arc;

use tm2_map::{SearchSlot, SuggestionEngine, SuggestionService};
use tm2_model::{MappingEntry, MappingExplanation, MappingSuggestion, RemoteSuggestion, SourceSystem};
use tm2_terminology::MappingTable;

fn entry(category: &str, keywords: &[&str], english_term: &str, confidence: u8) -> MappingEntry {
    MappingEntry {
        category: category.to_string(),
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        source_code: format!("AAA-{category}"),
        source_term: english_term.to_string(),
        source_term_english: english_term.to_string(),
        source_system: SourceSystem::Ayurveda,
        target_code: "XM0001".to_string(),
        target_term: english_term.to_string(),
        base_confidence: confidence,
    }
}

fn remote_record(code: &str, system: &str, confidence: u8) -> RemoteSuggestion {
    RemoteSuggestion {
        namaste_code: code.to_string(),
        namaste_term: "ज्वर".to_string(),
        english_term: "Jwara (fever)".to_string(),
        system: system.to_string(),
        icd11_code: "MG40".to_string(),
        icd11_term: "Fever of unknown origin".to_string(),
        confidence,
        description: Some("remote rationale".to_string()),
    }
}

struct FixedService(Vec<RemoteSuggestion>);

impl SuggestionService for FixedService {
    fn fetch_suggestions(&self, _clinical_text: &str) -> anyhow::Result<Vec<RemoteSuggestion>> {
        Ok(self.0.clone())
    }
}

struct FailingService;

impl SuggestionService for FailingService {
    fn fetch_suggestions(&self, _clinical_text: &str) -> anyhow::Result<Vec<RemoteSuggestion>> {
        anyhow::bail!("connection reset")
    }
}

struct PanickingService;

impl SuggestionService for PanickingService {
    fn fetch_suggestions(&self, _clinical_text: &str) -> anyhow::Result<Vec<RemoteSuggestion>> {
        panic!("remote service must not be consulted when the table matches");
    }
}

#[test]
fn respiratory_query_hits_the_respiratory_entry_first() {
    let engine = SuggestionEngine::new(MappingTable::builtin());
    let suggestions = engine.local_match("respiratory");
    assert!(!suggestions.is_empty());
    let first = &suggestions[0];
    assert_eq!(first.source_code, "AAA-2.1");
    assert_eq!(first.matched_keywords, vec!["respiratory"]);
    assert_eq!(first.target_code, "XM4567");
}

#[test]
fn empty_and_whitespace_inputs_yield_empty_results() {
    let engine = SuggestionEngine::new(MappingTable::builtin());
    assert!(engine.suggest("").is_empty());
    assert!(engine.suggest(" \t\n ").is_empty());
    assert!(engine.local_match("").is_empty());
    assert!(engine.local_match("   ").is_empty());
}

#[test]
fn unknown_text_without_remote_returns_one_generic_suggestion() {
    let engine = SuggestionEngine::new(MappingTable::builtin());
    let suggestions = engine.suggest("xyzzy-no-match");
    assert_eq!(suggestions.len(), 1);
    let generic = &suggestions[0];
    assert_eq!(generic.combined_score, 75);
    assert_eq!(generic.target_code, "XM0000");
    assert!(generic.matched_keywords.is_empty());
}

#[test]
fn matched_keywords_are_substrings_of_the_query() {
    let engine = SuggestionEngine::new(MappingTable::builtin());
    let query = "high fever with dry cough and joint pain";
    let lowered = query.to_lowercase();
    for suggestion in engine.local_match(query) {
        assert!(!suggestion.matched_keywords.is_empty());
        for keyword in &suggestion.matched_keywords {
            assert!(lowered.contains(keyword), "'{keyword}' not in query");
        }
    }
}

#[test]
fn local_match_orders_by_non_increasing_combined_score() {
    let engine = SuggestionEngine::new(MappingTable::builtin());
    let suggestions = engine.local_match("fever with cough and joint pain");
    assert!(suggestions.len() >= 3);
    for pair in suggestions.windows(2) {
        assert!(pair[0].combined_score >= pair[1].combined_score);
    }
}

#[test]
fn equal_scores_keep_table_order() {
    let table = MappingTable::from_entries(vec![
        entry("first", &["joint pain"], "Sandhigata Vata", 85),
        entry("second", &["joint pain"], "Sandhigata Vata", 85),
    ])
    .unwrap();
    let engine = SuggestionEngine::new(table);
    let suggestions = engine.local_match("joint pain");
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].combined_score, suggestions[1].combined_score);
    assert_eq!(suggestions[0].category.as_deref(), Some("first"));
    assert_eq!(suggestions[1].category.as_deref(), Some("second"));
}

#[test]
fn remote_suggestions_are_adopted_with_their_confidence() {
    let service = FixedService(vec![
        remote_record("AAE-2.3", "Ayurveda", 88),
        remote_record("ZZZ-9.9", "Homeopathy", 99),
    ]);
    let engine =
        SuggestionEngine::new(MappingTable::builtin()).with_remote(Box::new(service));
    let suggestions = engine.suggest("completely unknown complaint");
    // The record with an unrecognized system is dropped.
    assert_eq!(suggestions.len(), 1);
    let remote = &suggestions[0];
    assert_eq!(remote.source_code, "AAE-2.3");
    assert_eq!(remote.combined_score, 88);
    assert_eq!(remote.lexical_score, None);
    assert_eq!(remote.description.as_deref(), Some("remote rationale"));
}

#[test]
fn remote_failure_downgrades_to_the_generic_fallback() {
    let engine =
        SuggestionEngine::new(MappingTable::builtin()).with_remote(Box::new(FailingService));
    let suggestions = engine.suggest("completely unknown complaint");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].combined_score, 75);
}

#[test]
fn remote_empty_response_downgrades_to_the_generic_fallback() {
    let engine =
        SuggestionEngine::new(MappingTable::builtin()).with_remote(Box::new(FixedService(vec![])));
    let suggestions = engine.suggest("completely unknown complaint");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].target_code, "XM0000");
}

#[test]
fn remote_is_not_consulted_when_the_table_matches() {
    let engine =
        SuggestionEngine::new(MappingTable::builtin()).with_remote(Box::new(PanickingService));
    let suggestions = engine.suggest("patient reports fever");
    assert!(!suggestions.is_empty());
    assert_eq!(suggestions[0].category.as_deref(), Some("fever"));
}

#[test]
fn superseded_search_discards_its_result() {
    struct SupersedingService(Arc<SearchSlot>);

    impl SuggestionService for SupersedingService {
        fn fetch_suggestions(
            &self,
            _clinical_text: &str,
        ) -> anyhow::Result<Vec<RemoteSuggestion>> {
            // A newer search arrives while this one is in flight.
            self.0.begin();
            anyhow::bail!("interrupted")
        }
    }

    let slot = Arc::new(SearchSlot::new());
    let engine = SuggestionEngine::new(MappingTable::builtin())
        .with_remote(Box::new(SupersedingService(Arc::clone(&slot))));

    assert!(engine.suggest_superseding(&slot, "no such keywords").is_none());
    // An undisturbed search keeps its result.
    assert!(engine.suggest_superseding(&slot, "fever").is_some());
}

#[test]
fn explain_without_remote_uses_the_local_template() {
    let engine = SuggestionEngine::new(MappingTable::builtin());
    let suggestions = engine.local_match("fever");
    let suggestion = &suggestions[0];
    let explanation = engine.explain(suggestion);
    assert!(explanation.rationale.contains("MG40"));
    assert!(explanation.layman_explanation.contains("Jwara (fever)"));
    assert_eq!(explanation.confidence, suggestion.combined_score);
    assert!(!explanation.recommendations.is_empty());
}

#[test]
fn explain_prefers_a_capable_remote_service() {
    struct ExplainingService;

    impl SuggestionService for ExplainingService {
        fn fetch_suggestions(
            &self,
            _clinical_text: &str,
        ) -> anyhow::Result<Vec<RemoteSuggestion>> {
            Ok(Vec::new())
        }

        fn explain(
            &self,
            _suggestion: &MappingSuggestion,
        ) -> anyhow::Result<MappingExplanation> {
            Ok(MappingExplanation {
                rationale: "from the remote service".to_string(),
                layman_explanation: "plain words".to_string(),
                comparison: "side by side".to_string(),
                confidence: 91,
                recommendations: vec![],
            })
        }
    }

    let engine =
        SuggestionEngine::new(MappingTable::builtin()).with_remote(Box::new(ExplainingService));
    let suggestions = engine.local_match("fever");
    let suggestion = &suggestions[0];
    let explanation = engine.explain(suggestion);
    assert_eq!(explanation.rationale, "from the remote service");
    assert_eq!(explanation.confidence, 91);
}
