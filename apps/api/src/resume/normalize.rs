//! Response Normalizer — turns a raw Gemini envelope into a clean resume object.
//!
//! Only `candidates[0].content.parts[0].text` is read. The answer is usually a
//! string of (possibly fenced) JSON, but an already-structured object is
//! accepted as-is.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("missing candidates[0].content.parts[0].text: {0}")]
    MissingAnswer(String),

    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// The only part of the envelope that is read; siblings may have any shape.
const ANSWER_POINTER: &str = "/candidates/0/content/parts/0/text";

/// The model's answer: text to be parsed, or an object used directly.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnswerPart {
    Text(String),
    Structured(Map<String, Value>),
}

/// Extracts, parses and null-strips the model's answer.
pub fn normalize_response(mut envelope: Value) -> Result<Value, NormalizeError> {
    let answer = envelope
        .pointer_mut(ANSWER_POINTER)
        .map(Value::take)
        .ok_or_else(|| NormalizeError::MissingAnswer("path not present".to_string()))?;

    let answer: AnswerPart = serde_json::from_value(answer)
        .map_err(|_| NormalizeError::MissingAnswer("not a string or object".to_string()))?;

    let parsed = match answer {
        AnswerPart::Structured(map) => Value::Object(map),
        AnswerPart::Text(text) => serde_json::from_str(strip_json_fences(&text))?,
    };

    if !parsed.is_object() {
        return Err(NormalizeError::NotAnObject(json_kind(&parsed)));
    }

    Ok(strip_nulls(parsed))
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// The closing fence is optional.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.trim_end();
    text.strip_suffix("```").unwrap_or(text).trim()
}

/// Recursively drops null object values and null array elements.
/// Everything else, including `""`, `0`, `false` and empty containers, is kept
/// in its original order.
pub fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_nulls)
                .collect(),
        ),
        other => other,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
