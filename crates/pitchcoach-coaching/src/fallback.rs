//! Deterministic rule-based coaching used when no provider answer is usable.

use crate::types::{
    CoachingAnalysis, CoachingContext, CoachingSuggestion, SuggestionPriority, SuggestionType,
};

/// Product value keywords checked in the rep's message by default.
pub const DEFAULT_VALUE_KEYWORDS: &[&str] = &[
    "browserbase",
    "cloud browser",
    "headless browser",
    "browser automation",
];

/// Messages longer than this without any value keyword get a hint.
const HINT_MIN_CHARS: usize = 20;
/// Messages shorter than this get a detail warning.
const SHORT_MESSAGE_CHARS: usize = 30;
/// Key-point coverage is only checked after this turn.
const KEY_POINT_MIN_TURN: u32 = 2;

const SCORE_WITH_KEYWORDS: u8 = 75;
const SCORE_WITHOUT_KEYWORDS: u8 = 60;

/// A key point is unaddressed when none of its lowercase tokens appear in the message.
/// Blank key points have nothing to address and are skipped.
fn first_unaddressed_key_point<'a>(key_points: &'a [String], message_lower: &str) -> Option<&'a str> {
    key_points
        .iter()
        .filter(|point| !point.trim().is_empty())
        .find(|point| {
            !point
                .to_lowercase()
                .split_whitespace()
                .any(|token| message_lower.contains(token))
        })
        .map(String::as_str)
}

/// Produce coaching from fixed rules over the rep's message and scenario.
#[must_use]
pub fn fallback_coaching(ctx: &CoachingContext, value_keywords: &[String]) -> CoachingAnalysis {
    let message = ctx.user_message.as_str();
    let message_lower = message.to_lowercase();
    let length = message.chars().count();
    let has_keywords = value_keywords
        .iter()
        .any(|kw| message_lower.contains(&kw.to_lowercase()));

    let mut suggestions = Vec::new();

    if !has_keywords && length > HINT_MIN_CHARS {
        suggestions.push(CoachingSuggestion {
            kind: SuggestionType::Hint,
            priority: SuggestionPriority::High,
            message: "Consider mentioning the product's key value propositions".to_string(),
            suggestion: Some(format!("Try mentioning: {}", value_keywords.join(", "))),
            keywords: Some(value_keywords.to_vec()),
            confidence: 0.8,
        });
    }

    if length < SHORT_MESSAGE_CHARS {
        suggestions.push(CoachingSuggestion {
            kind: SuggestionType::Warning,
            priority: SuggestionPriority::Medium,
            message: "Your response is quite short. Consider providing more detail.".to_string(),
            suggestion: None,
            keywords: None,
            confidence: 0.7,
        });
    }

    if ctx.turn_number > KEY_POINT_MIN_TURN {
        if let Some(point) = first_unaddressed_key_point(&ctx.scenario.key_points, &message_lower) {
            suggestions.push(CoachingSuggestion {
                kind: SuggestionType::Improvement,
                priority: SuggestionPriority::Medium,
                message: format!("You haven't addressed: {point}"),
                suggestion: Some(format!("Consider discussing: {point}")),
                keywords: None,
                confidence: 0.75,
            });
        }
    }

    let (strengths, weaknesses) = if has_keywords {
        (vec!["Good use of product value terminology".to_string()], Vec::new())
    } else {
        (Vec::new(), vec!["Missing product value propositions".to_string()])
    };

    CoachingAnalysis {
        suggestions,
        overall_score: if has_keywords {
            SCORE_WITH_KEYWORDS
        } else {
            SCORE_WITHOUT_KEYWORDS
        },
        strengths,
        weaknesses,
        next_steps: vec![
            "Continue addressing the prospect's concerns".to_string(),
            "Build towards booking a meeting".to_string(),
        ],
    }
}
