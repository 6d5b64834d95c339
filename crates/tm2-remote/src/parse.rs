//! Lenient parsing of service responses.
//!
//! The generative service does not always return clean JSON: the payload
//! may arrive bare, wrapped in an envelope object, or embedded in prose.
//! Extraction tries the strict forms first and falls back to slicing out
//! the first bracketed JSON value.

use serde::Deserialize;

use tm2_model::{MappingExplanation, RemoteSuggestion};

use crate::error::{RemoteError, Result};

pub(crate) fn parse_suggestions(body: &str) -> Result<Vec<RemoteSuggestion>> {
    if let Ok(records) = serde_json::from_str::<Vec<RemoteSuggestion>>(body) {
        return Ok(records);
    }

    #[derive(Deserialize)]
    struct Envelope {
        suggestions: Vec<RemoteSuggestion>,
    }
    if let Ok(envelope) = serde_json::from_str::<Envelope>(body) {
        return Ok(envelope.suggestions);
    }

    if let Some(slice) = delimited(body, '[', ']')
        && let Ok(records) = serde_json::from_str::<Vec<RemoteSuggestion>>(slice)
    {
        return Ok(records);
    }

    Err(RemoteError::Parse(
        "no suggestion array found in response".to_string(),
    ))
}

pub(crate) fn parse_embeddings(body: &str) -> Result<Vec<f32>> {
    if let Ok(vector) = serde_json::from_str::<Vec<f32>>(body) {
        return Ok(vector);
    }

    #[derive(Deserialize)]
    struct Envelope {
        embedding: Vec<f32>,
    }
    if let Ok(envelope) = serde_json::from_str::<Envelope>(body) {
        return Ok(envelope.embedding);
    }

    if let Some(slice) = delimited(body, '[', ']')
        && let Ok(vector) = serde_json::from_str::<Vec<f32>>(slice)
    {
        return Ok(vector);
    }

    Err(RemoteError::Parse(
        "no embedding vector found in response".to_string(),
    ))
}

pub(crate) fn parse_explanation(body: &str) -> Result<MappingExplanation> {
    if let Ok(explanation) = serde_json::from_str::<MappingExplanation>(body) {
        return Ok(explanation);
    }

    if let Some(slice) = delimited(body, '{', '}')
        && let Ok(explanation) = serde_json::from_str::<MappingExplanation>(slice)
    {
        return Ok(explanation);
    }

    Err(RemoteError::Parse(
        "no explanation object found in response".to_string(),
    ))
}

/// Slice from the first `open` to the last `close`, inclusive.
fn delimited(body: &str, open: char, close: char) -> Option<&str> {
    let start = body.find(open)?;
    let end = body.rfind(close)?;
    (end > start).then(|| &body[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "namasteCode": "AAE-2.3",
        "namasteTerm": "ज्वर",
        "englishTerm": "Jwara (fever)",
        "system": "Ayurveda",
        "icd11Code": "MG40",
        "icd11Term": "Fever of unknown origin",
        "confidence": 88
    }"#;

    #[test]
    fn parses_a_bare_array() {
        let body = format!("[{RECORD}]");
        let records = parse_suggestions(&body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].icd11_code, "MG40");
    }

    #[test]
    fn parses_an_envelope_object() {
        let body = format!(r#"{{"suggestions": [{RECORD}]}}"#);
        let records = parse_suggestions(&body).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn parses_an_array_embedded_in_prose() {
        let body = format!("Here are the mappings you asked for:\n[{RECORD}]\nLet me know!");
        let records = parse_suggestions(&body).unwrap();
        assert_eq!(records[0].confidence, 88);
    }

    #[test]
    fn rejects_bodies_without_a_suggestion_array() {
        assert!(parse_suggestions("I could not find any mappings.").is_err());
        assert!(parse_suggestions("[1, 2, 3]").is_err());
        assert!(parse_suggestions("").is_err());
    }

    #[test]
    fn parses_embeddings_in_all_shapes() {
        assert_eq!(parse_embeddings("[0.5, 1.0]").unwrap(), vec![0.5, 1.0]);
        assert_eq!(
            parse_embeddings(r#"{"embedding": [2.0]}"#).unwrap(),
            vec![2.0]
        );
        assert_eq!(
            parse_embeddings("the vector is [1.5, 2.5] as requested").unwrap(),
            vec![1.5, 2.5]
        );
        assert!(parse_embeddings("no numbers here").is_err());
    }

    #[test]
    fn parses_an_explanation_from_prose() {
        let body = r#"Certainly. {"rationale": "overlap", "laymanExplanation": "similar",
            "comparison": "aligned", "confidence": 90, "recommendations": []}"#;
        let explanation = parse_explanation(body).unwrap();
        assert_eq!(explanation.confidence, 90);
    }
}
