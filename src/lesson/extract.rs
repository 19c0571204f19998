use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::Answer;
use crate::error::GenerationError;

lazy_static! {
    // Greedy: first `{` through last `}`, across newlines.
    static ref JSON_OBJECT: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

const REQUIRED_FIELDS: [&str; 3] = ["english", "japanese", "grammarBreakdown"];

/// Pull the JSON payload out of raw model text. Falls back to the whole
/// text when it contains no brace-delimited span.
pub fn extract_json(raw: &str) -> &str {
    match JSON_OBJECT.find(raw) {
        Some(m) => m.as_str(),
        None => raw,
    }
}

/// Extract, parse and type-check a model reply.
///
/// Invalid JSON is `MalformedOutput`; valid JSON that is not an object with
/// the `Answer` fields is `SchemaMismatch`.
pub fn parse_answer(raw: &str) -> Result<Answer, GenerationError> {
    let payload = extract_json(raw);
    tracing::debug!("Extracted model payload: {}", payload);

    let value: Value = serde_json::from_str(payload)
        .map_err(|e| GenerationError::MalformedOutput(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| GenerationError::SchemaMismatch("reply is not a JSON object".into()))?;

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !object.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        return Err(GenerationError::SchemaMismatch(format!(
            "missing fields: {}",
            missing.join(", ")
        )));
    }

    serde_json::from_value(value).map_err(|e| GenerationError::SchemaMismatch(e.to_string()))
}
