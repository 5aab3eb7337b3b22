//! JSON recovery from unstructured model replies

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use memeweaver_types::InteractionDecision;

// Tried in order; the first capture that decodes as JSON wins.
static JSON_RESPONSE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?s)json.?(\{.*\})").unwrap(),
        Regex::new(r"(?s)json(\{.*\})").unwrap(),
        Regex::new(r"(?s)```json(.*)```").unwrap(),
    ]
});

/// Locate and decode a JSON object or array inside a model reply.
///
/// Returns `None` when no pattern yields decodable JSON; callers map that
/// to the round's error event rather than inferring a fallback action.
pub fn extract_json(response: &str) -> Option<Value> {
    for pattern in JSON_RESPONSE_PATTERNS.iter() {
        let Some(captures) = pattern.captures(response) else {
            continue;
        };
        let candidate = captures.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        match serde_json::from_str(candidate) {
            Ok(value) => return Some(value),
            Err(_) => continue,
        }
    }
    None
}

/// Normalize a decoded decision payload into a list.
///
/// Models answer with either a single decision object or an array of them;
/// both are accepted. Entries that do not parse as a decision are dropped
/// with a warning instead of failing the batch.
pub fn normalize_decisions(value: Value) -> Vec<InteractionDecision> {
    let entries = match value {
        Value::Array(entries) => entries,
        object @ Value::Object(_) => vec![object],
        other => {
            warn!(kind = %value_kind(&other), "decision payload is neither object nor array");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(decision) => Some(decision),
            Err(e) => {
                warn!(error = %e, "dropping undecodable decision entry");
                None
            }
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
