use pitchcoach_core::{ConversationMessage, ScenarioContext};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Hint,
    Warning,
    Success,
    Improvement,
}

impl SuggestionType {
    /// Lenient parse used when normalizing model output; unknown values become `Hint`.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "warning" => SuggestionType::Warning,
            "success" => SuggestionType::Success,
            "improvement" => SuggestionType::Improvement,
            _ => SuggestionType::Hint,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionPriority {
    High,
    Medium,
    Low,
}

impl SuggestionPriority {
    /// Lenient parse used when normalizing model output; unknown values become `Medium`.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "high" => SuggestionPriority::High,
            "low" => SuggestionPriority::Low,
            _ => SuggestionPriority::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub priority: SuggestionPriority,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// In `[0, 1]`.
    pub confidence: f64,
}

/// Coaching feedback for one rep turn. Every list is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingAnalysis {
    pub suggestions: Vec<CoachingSuggestion>,
    /// Integer in `0..=100`.
    pub overall_score: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub next_steps: Vec<String>,
}

/// Input for one coaching request.
#[derive(Debug, Clone)]
pub struct CoachingContext {
    /// The rep's current message being coached.
    pub user_message: String,
    /// Conversation so far, in order.
    pub transcript: Vec<ConversationMessage>,
    pub scenario: ScenarioContext,
    /// 1-based turn number within the role-play.
    pub turn_number: u32,
}

/// Which branch produced a [`CoachingAnalysis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachingPath {
    Provider,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingOutcome {
    pub analysis: CoachingAnalysis,
    pub path: CoachingPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_parsers_default_unknown_values() {
        assert_eq!(SuggestionType::parse_lenient("Warning"), SuggestionType::Warning);
        assert_eq!(SuggestionType::parse_lenient("tip"), SuggestionType::Hint);
        assert_eq!(SuggestionPriority::parse_lenient(" LOW "), SuggestionPriority::Low);
        assert_eq!(SuggestionPriority::parse_lenient("urgent"), SuggestionPriority::Medium);
    }

    #[test]
    fn analysis_serializes_camel_case() {
        let analysis = CoachingAnalysis {
            suggestions: vec![CoachingSuggestion {
                kind: SuggestionType::Improvement,
                priority: SuggestionPriority::High,
                message: "Ask about budget".to_string(),
                suggestion: None,
                keywords: None,
                confidence: 0.9,
            }],
            overall_score: 81,
            strengths: vec![],
            weaknesses: vec![],
            next_steps: vec!["Book a demo".to_string()],
        };
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["overallScore"], 81);
        assert_eq!(json["nextSteps"][0], "Book a demo");
        assert_eq!(json["suggestions"][0]["type"], "improvement");
        assert_eq!(json["suggestions"][0]["priority"], "high");
        assert!(json["suggestions"][0].get("suggestion").is_none());
    }
}
