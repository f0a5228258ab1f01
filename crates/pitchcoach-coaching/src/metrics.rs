//! Quantitative conversation metrics computed from a role-play transcript.

use pitchcoach_core::{ConversationMessage, Role};
use serde::Serialize;

/// Rep-speaking share at or below which the rep is considered too quiet.
const BALANCED_LOW: f64 = 0.4;
/// Rep-speaking share at or above which the rep is considered dominating.
const BALANCED_HIGH: f64 = 0.6;

/// Lowercase phrases that turn a rep question into a discovery question.
const DISCOVERY_MARKERS: &[&str] = &["what", "how", "why", "tell me", "can you explain"];

/// Lowercase phrases that flag a prospect message as an objection.
const OBJECTION_MARKERS: &[&str] = &[
    "concern", "worried", "not sure", "but", "however", "problem", "issue",
];

/// Share of detected objections assumed left unhandled.
///
/// Placeholder estimate: handling is not actually detected from turn
/// adjacency, so `handled` is `detected - floor(detected * 0.3)`.
const UNHANDLED_OBJECTION_SHARE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TalkStatus {
    Balanced,
    RepDominating,
    RepTooQuiet,
}

impl TalkStatus {
    fn from_ratio(ratio: f64) -> Self {
        if ratio > BALANCED_HIGH {
            TalkStatus::RepDominating
        } else if ratio < BALANCED_LOW {
            TalkStatus::RepTooQuiet
        } else {
            TalkStatus::Balanced
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TalkStatus::Balanced => "balanced",
            TalkStatus::RepDominating => "rep_dominating",
            TalkStatus::RepTooQuiet => "rep_too_quiet",
        }
    }
}

impl std::fmt::Display for TalkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TalkToListen {
    /// Rep words over all words, in `[0, 1]`.
    pub ratio: f64,
    pub rep_word_count: usize,
    pub prospect_word_count: usize,
    pub status: TalkStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStats {
    pub rep_questions: usize,
    pub prospect_questions: usize,
    pub discovery_questions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectionStats {
    pub detected: usize,
    pub handled: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationFlow {
    pub rep_turns: usize,
    pub prospect_turns: usize,
    /// Mean character count over every message; 0 for an empty transcript.
    pub average_message_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMetrics {
    pub talk_to_listen: TalkToListen,
    pub questions: QuestionStats,
    pub objections: ObjectionStats,
    pub flow: ConversationFlow,
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn contains_any(lower: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| lower.contains(m))
}

/// Compute metrics for a transcript. Total: never fails, any input is valid.
#[must_use]
pub fn compute(transcript: &[ConversationMessage]) -> ConversationMetrics {
    let mut rep_words = 0_usize;
    let mut prospect_words = 0_usize;
    let mut rep_turns = 0_usize;
    let mut prospect_turns = 0_usize;
    let mut rep_questions = 0_usize;
    let mut prospect_questions = 0_usize;
    let mut discovery_questions = 0_usize;
    let mut objections = 0_usize;
    let mut total_chars = 0_usize;

    for message in transcript {
        let text = message.text.as_str();
        let is_question = text.contains('?');
        let lower = text.to_lowercase();
        total_chars += text.chars().count();

        match message.role {
            Role::Rep => {
                rep_turns += 1;
                rep_words += word_count(text);
                if is_question {
                    rep_questions += 1;
                    if contains_any(&lower, DISCOVERY_MARKERS) {
                        discovery_questions += 1;
                    }
                }
            }
            Role::Prospect => {
                prospect_turns += 1;
                prospect_words += word_count(text);
                if is_question {
                    prospect_questions += 1;
                }
                if contains_any(&lower, OBJECTION_MARKERS) {
                    objections += 1;
                }
            }
        }
    }

    let total_words = rep_words + prospect_words;
    #[allow(clippy::cast_precision_loss)]
    let ratio = if total_words == 0 {
        0.5
    } else {
        rep_words as f64 / total_words as f64
    };

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let unhandled = (objections as f64 * UNHANDLED_OBJECTION_SHARE).floor() as usize;

    #[allow(clippy::cast_precision_loss)]
    let average_message_length = if transcript.is_empty() {
        0.0
    } else {
        total_chars as f64 / transcript.len() as f64
    };

    ConversationMetrics {
        talk_to_listen: TalkToListen {
            ratio,
            rep_word_count: rep_words,
            prospect_word_count: prospect_words,
            status: TalkStatus::from_ratio(ratio),
        },
        questions: QuestionStats {
            rep_questions,
            prospect_questions,
            discovery_questions,
        },
        objections: ObjectionStats {
            detected: objections,
            handled: objections.saturating_sub(unhandled),
        },
        flow: ConversationFlow {
            rep_turns,
            prospect_turns,
            average_message_length,
        },
    }
}

/// One-line coaching tip for the talk-to-listen balance.
#[must_use]
pub fn talk_to_listen_recommendation(ratio: f64, status: TalkStatus) -> String {
    match status {
        TalkStatus::Balanced => "Great balance! Continue listening actively.".to_string(),
        TalkStatus::RepDominating => format!(
            "You're talking {:.0}% of the time. Aim for 40-60%. Ask questions and pause longer for responses.",
            ratio * 100.0
        ),
        TalkStatus::RepTooQuiet => {
            "You might be too quiet. Share more value and ask follow-up questions.".to_string()
        }
    }
}
