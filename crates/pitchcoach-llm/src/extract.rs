//! Recovery of JSON payloads from free-form model output.
//!
//! Models asked for JSON routinely wrap it in prose or markdown fences. The
//! payload is taken as the greedy `{ … }` span: from the first `{` to the last
//! `}` in the text.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::LlmError;

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid json object regex"));

/// Extract and decode the JSON object embedded in `text`.
///
/// # Errors
///
/// Returns [`LlmError::Protocol`] if no `{ … }` span exists or it is not
/// valid JSON.
pub fn extract_json_object(text: &str) -> Result<serde_json::Value, LlmError> {
    let span = JSON_OBJECT
        .find(text)
        .ok_or_else(|| LlmError::Protocol("no JSON object found in model reply".to_string()))?;

    serde_json::from_str(span.as_str())
        .map_err(|e| LlmError::Protocol(format!("model reply contains malformed JSON: {e}")))
}

/// Extract the embedded JSON object and deserialize it into `T`.
///
/// # Errors
///
/// Returns [`LlmError::Protocol`] if extraction fails or the object does not
/// match `T`.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let value = extract_json_object(text)?;
    serde_json::from_value(value)
        .map_err(|e| LlmError::Protocol(format!("model reply has unexpected shape: {e}")))
}
