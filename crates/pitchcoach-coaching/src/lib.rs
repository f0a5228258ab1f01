//! Conversation metrics and real-time coaching for PitchCoach role-plays.
//!
//! [`compute_metrics`] is a pure function over a transcript. The
//! [`CoachingOrchestrator`] asks the configured text-completion provider for
//! coaching once per turn and substitutes deterministic rule-based coaching
//! whenever that attempt fails, times out or is cancelled. The
//! [`ProspectResponder`] plays the buyer under the same contract.

pub mod fallback;
pub mod metrics;
pub mod normalize;
pub mod orchestrator;
pub mod prompt;
pub mod prospect;
pub mod types;

pub use fallback::{fallback_coaching, DEFAULT_VALUE_KEYWORDS};
pub use metrics::{
    compute as compute_metrics, talk_to_listen_recommendation, ConversationMetrics, TalkStatus,
};
pub use normalize::{normalize, RawCoachingReply};
pub use orchestrator::{CoachingOrchestrator, DEFAULT_PROVIDER_TIMEOUT};
pub use prompt::{build_coaching_prompt, SYSTEM_PROMPT};
pub use prospect::{
    extract_objections, infer_tone, parse_prospect_reply, scripted_reply, Difficulty, NextAction,
    Personality, ProspectContext, ProspectOutcome, ProspectReply, ProspectResponder,
    ProspectSettings, SalesMethodology, Tone,
};
pub use types::{
    CoachingAnalysis, CoachingContext, CoachingOutcome, CoachingPath, CoachingSuggestion,
    SuggestionPriority, SuggestionType,
};
