//! Lenient conversion of model JSON into the [`CoachingAnalysis`] contract.
//!
//! Models drift from the requested schema. Anything recoverable is repaired
//! here so callers always see complete, in-range values.

use serde::Deserialize;
use serde_json::Value;

use crate::types::{CoachingAnalysis, CoachingSuggestion, SuggestionPriority, SuggestionType};

/// Score used when the model omits `overallScore` or sends a non-number.
/// An explicit `0` is a real score and is kept.
pub const DEFAULT_OVERALL_SCORE: u8 = 70;
/// Confidence used when a suggestion omits it.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Coaching reply as the model actually sent it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCoachingReply {
    pub suggestions: Option<Vec<Value>>,
    pub overall_score: Option<f64>,
    pub strengths: Option<Vec<Value>>,
    pub weaknesses: Option<Vec<Value>>,
    pub next_steps: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSuggestion {
    #[serde(rename = "type")]
    kind: Option<String>,
    priority: Option<String>,
    message: Option<String>,
    suggestion: Option<String>,
    keywords: Option<Vec<Value>>,
    confidence: Option<f64>,
}

fn strings(values: Option<Vec<Value>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn suggestion(value: Value) -> Option<CoachingSuggestion> {
    let raw: RawSuggestion = serde_json::from_value(value).ok()?;
    let message = non_blank(raw.message)?;
    let keywords = raw.keywords.map(|k| strings(Some(k))).filter(|k| !k.is_empty());

    Some(CoachingSuggestion {
        kind: raw
            .kind
            .as_deref()
            .map_or(SuggestionType::Hint, SuggestionType::parse_lenient),
        priority: raw
            .priority
            .as_deref()
            .map_or(SuggestionPriority::Medium, SuggestionPriority::parse_lenient),
        message,
        suggestion: non_blank(raw.suggestion),
        keywords,
        confidence: raw
            .confidence
            .filter(|c| c.is_finite())
            .map_or(DEFAULT_CONFIDENCE, |c| c.clamp(0.0, 1.0)),
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn overall_score(raw: Option<f64>) -> u8 {
    match raw.filter(|s| s.is_finite()) {
        None => DEFAULT_OVERALL_SCORE,
        Some(score) => score.round().clamp(0.0, 100.0) as u8,
    }
}

/// Repair a decoded model reply into a complete analysis.
#[must_use]
pub fn normalize(raw: RawCoachingReply) -> CoachingAnalysis {
    let suggestions = raw
        .suggestions
        .unwrap_or_default()
        .into_iter()
        .filter_map(suggestion)
        .collect();

    CoachingAnalysis {
        suggestions,
        overall_score: overall_score(raw.overall_score),
        strengths: strings(raw.strengths),
        weaknesses: strings(raw.weaknesses),
        next_steps: strings(raw.next_steps),
    }
}
