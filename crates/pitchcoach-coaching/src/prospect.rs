//! The AI-played prospect: generates the buyer's reply to each rep message.
//!
//! Shares the orchestrator's contract: one provider attempt, and scripted
//! replies whenever that attempt fails, times out or is cancelled.

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use pitchcoach_core::{ConversationMessage, CoreError, Role, ScenarioContext};
use pitchcoach_llm::{parse_json_reply, LlmError, TextCompletion};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::orchestrator::{AttemptFailure, DEFAULT_PROVIDER_TIMEOUT};
use crate::types::CoachingPath;

/// Only the most recent messages are shown to the model.
const HISTORY_WINDOW: usize = 10;
/// Concern raised by a skeptical prospect when the scenario names none.
const DEFAULT_CONCERN: &str = "implementation";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    Friendly,
    #[default]
    Professional,
    Skeptical,
    Abrasive,
    Hostile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SalesMethodology {
    Gap,
    Spin,
    Meddic,
    Bant,
}

impl Difficulty {
    fn is_demanding(self) -> bool {
        matches!(self, Difficulty::Hard | Difficulty::Expert)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl Personality {
    fn is_combative(self) -> bool {
        matches!(self, Personality::Abrasive | Personality::Hostile)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Personality::Friendly => "friendly",
            Personality::Professional => "professional",
            Personality::Skeptical => "skeptical",
            Personality::Abrasive => "abrasive",
            Personality::Hostile => "hostile",
        }
    }
}

impl SalesMethodology {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SalesMethodology::Gap => "GAP",
            SalesMethodology::Spin => "SPIN",
            SalesMethodology::Meddic => "MEDDIC",
            SalesMethodology::Bant => "BANT",
        }
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            other => Err(CoreError::Validation(format!(
                "unknown difficulty '{other}'; expected easy, medium, hard or expert"
            ))),
        }
    }
}

impl FromStr for Personality {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "friendly" => Ok(Personality::Friendly),
            "professional" => Ok(Personality::Professional),
            "skeptical" => Ok(Personality::Skeptical),
            "abrasive" => Ok(Personality::Abrasive),
            "hostile" => Ok(Personality::Hostile),
            other => Err(CoreError::Validation(format!(
                "unknown personality '{other}'; expected friendly, professional, skeptical, abrasive or hostile"
            ))),
        }
    }
}

impl FromStr for SalesMethodology {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GAP" => Ok(SalesMethodology::Gap),
            "SPIN" => Ok(SalesMethodology::Spin),
            "MEDDIC" => Ok(SalesMethodology::Meddic),
            "BANT" => Ok(SalesMethodology::Bant),
            other => Err(CoreError::Validation(format!(
                "unknown sales methodology '{other}'; expected GAP, SPIN, MEDDIC or BANT"
            ))),
        }
    }
}

/// How the prospect should behave for this role-play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProspectSettings {
    pub difficulty: Difficulty,
    pub personality: Personality,
    pub methodology: Option<SalesMethodology>,
}

/// Input for one prospect reply.
#[derive(Debug, Clone)]
pub struct ProspectContext {
    pub scenario: ScenarioContext,
    /// Conversation before the rep's latest message.
    pub transcript: Vec<ConversationMessage>,
    pub rep_message: String,
    pub settings: ProspectSettings,
}

impl ProspectContext {
    /// 1-based turn of the rep message being answered.
    #[must_use]
    pub fn turn_number(&self) -> usize {
        self.transcript.iter().filter(|m| m.role == Role::Rep).count() + 1
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    #[default]
    Neutral,
    Skeptical,
    Negative,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NextAction {
    #[default]
    Continue,
    Objection,
    Interest,
    Close,
}

impl Tone {
    fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "positive" => Tone::Positive,
            "skeptical" => Tone::Skeptical,
            "negative" => Tone::Negative,
            _ => Tone::Neutral,
        }
    }
}

impl NextAction {
    fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "objection" => NextAction::Objection,
            "interest" => NextAction::Interest,
            "close" => NextAction::Close,
            _ => NextAction::Continue,
        }
    }
}

/// The prospect's side of one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectReply {
    pub message: String,
    pub tone: Tone,
    pub objections: Vec<String>,
    pub buying_signals: Vec<String>,
    pub next_action: NextAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectOutcome {
    pub reply: ProspectReply,
    pub path: CoachingPath,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawProspectReply {
    message: Option<String>,
    tone: Option<String>,
    objections: Option<Vec<Value>>,
    buying_signals: Option<Vec<Value>>,
    next_action: Option<String>,
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

fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

/// Tone of a free-text reply. Positive cues win over skeptical ones, which win
/// over negative ones.
#[must_use]
pub fn infer_tone(message: &str) -> Tone {
    let lower = message.to_lowercase();
    let any = |cues: &[&str]| cues.iter().any(|cue| lower.contains(cue));

    if any(&["interested", "sounds good", "tell me more"]) {
        Tone::Positive
    } else if any(&["concern", "worried", "not sure"]) {
        Tone::Skeptical
    } else if has_word(&lower, "no") || any(&["not interested", "waste"]) {
        Tone::Negative
    } else {
        Tone::Neutral
    }
}

/// Objection categories mentioned in a free-text reply, in fixed order.
#[must_use]
pub fn extract_objections(message: &str) -> Vec<String> {
    const LEXICON: &[(&str, &[&str])] = &[
        ("price", &["price", "cost", "expensive"]),
        ("timing", &["time", "timeline", "implementation"]),
        ("security", &["security", "compliance", "data"]),
        ("adoption", &["team", "adoption", "training"]),
    ];

    let lower = message.to_lowercase();
    LEXICON
        .iter()
        .filter(|(_, cues)| cues.iter().any(|cue| lower.contains(cue)))
        .map(|(category, _)| (*category).to_string())
        .collect()
}

/// Turn model text into a reply. JSON replies are repaired field by field;
/// anything else is used verbatim with tone and objections inferred.
#[must_use]
pub fn parse_prospect_reply(text: &str) -> ProspectReply {
    let text = text.trim();
    match parse_json_reply::<RawProspectReply>(text) {
        Ok(raw) => ProspectReply {
            message: raw
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| text.to_string()),
            tone: raw.tone.as_deref().map_or(Tone::Neutral, Tone::parse_lenient),
            objections: strings(raw.objections),
            buying_signals: strings(raw.buying_signals),
            next_action: raw
                .next_action
                .as_deref()
                .map_or(NextAction::Continue, NextAction::parse_lenient),
        },
        Err(e) => {
            tracing::debug!(error = %e, "prospect reply is not JSON; treating it as prose");
            ProspectReply {
                message: text.to_string(),
                tone: infer_tone(text),
                objections: extract_objections(text),
                buying_signals: Vec::new(),
                next_action: NextAction::Continue,
            }
        }
    }
}

/// Scripted reply chosen by turn, difficulty and personality.
#[must_use]
pub fn scripted_reply(ctx: &ProspectContext) -> ProspectReply {
    let persona = &ctx.scenario.persona;
    let settings = ctx.settings;

    if ctx.turn_number() == 1 {
        return ProspectReply {
            message: format!(
                "Hi, thanks for reaching out. I'm {}. What can you tell me about your solution?",
                persona.name
            ),
            tone: Tone::Neutral,
            objections: Vec::new(),
            buying_signals: Vec::new(),
            next_action: NextAction::Continue,
        };
    }

    if settings.difficulty == Difficulty::Hard || settings.personality == Personality::Skeptical {
        let category = ctx.scenario.objection_category.trim();
        let concern = if category.is_empty() { DEFAULT_CONCERN } else { category };
        return ProspectReply {
            message: format!("I see. But I'm concerned about {concern}. How do you address that?"),
            tone: Tone::Skeptical,
            objections: vec![concern.to_string()],
            buying_signals: Vec::new(),
            next_action: NextAction::Objection,
        };
    }

    if settings.personality.is_combative() {
        return ProspectReply {
            message: "Look, we've tried solutions like this before and they didn't work. \
                      What makes yours different?"
                .to_string(),
            tone: Tone::Negative,
            objections: vec!["previous failures".to_string()],
            buying_signals: Vec::new(),
            next_action: NextAction::Objection,
        };
    }

    ProspectReply {
        message: "That's interesting. Can you tell me more about how it would work with our \
                  current setup?"
            .to_string(),
        tone: Tone::Neutral,
        objections: Vec::new(),
        buying_signals: vec!["asking for details".to_string()],
        next_action: NextAction::Interest,
    }
}

/// System prompt putting the model in the prospect's shoes.
#[must_use]
pub fn build_prospect_system_prompt(ctx: &ProspectContext) -> String {
    let settings = ctx.settings;
    let stance = if settings.difficulty.is_demanding() {
        "Be skeptical and push back on claims. Ask tough questions. Don't roll over easily."
    } else if settings.personality.is_combative() {
        "Be challenging and direct. Push back aggressively on weak arguments."
    } else {
        "Be professional but engaged. Show interest when the rep addresses your concerns well."
    };

    format!(
        "You are playing a B2B buyer in a sales role-play.

Persona: {persona}
Main objection area: {category}

Personality: {personality}
Difficulty level: {difficulty}

{stance}

Respond naturally as this persona would. Don't be too easy; make the rep work for it.",
        persona = ctx.scenario.persona.summary(),
        category = ctx.scenario.objection_category,
        personality = settings.personality.as_str(),
        difficulty = settings.difficulty.as_str(),
    )
}

/// User prompt carrying the recent history and the rep's latest message.
#[must_use]
pub fn build_prospect_prompt(ctx: &ProspectContext) -> String {
    let skip = ctx.transcript.len().saturating_sub(HISTORY_WINDOW);
    let history = ctx.transcript[skip..]
        .iter()
        .map(|m| {
            let speaker = match m.role {
                Role::Rep => "Rep",
                Role::Prospect => "Prospect",
            };
            format!("{speaker}: {}", m.text)
        })
        .collect::<Vec<_>>()
        .join("\n");
    let methodology = ctx
        .settings
        .methodology
        .map(|m| format!("\nSales methodology being used: {}\n", m.as_str()))
        .unwrap_or_default();

    format!(
        r#"Conversation History:
{history}

Rep's latest message: {message}
{methodology}
Generate a response as the prospect. Consider:
1. Your persona's concerns and goals
2. Whether the rep addressed your concerns
3. Your personality and communication style
4. The difficulty level ({difficulty})

Respond naturally. If the rep hasn't addressed your concerns well, push back. If they have, show more interest.

Return JSON:
{{
  "message": "Your response as the prospect",
  "tone": "positive|neutral|skeptical|negative",
  "objections": ["any objections raised"],
  "buyingSignals": ["any buying signals"],
  "nextAction": "continue|objection|interest|close"
}}"#,
        message = ctx.rep_message,
        difficulty = ctx.settings.difficulty.as_str(),
    )
}

/// Plays the prospect. Never fails: provider problems yield a scripted reply.
pub struct ProspectResponder<G: TextCompletion> {
    gateway: G,
    timeout: Duration,
}

impl<G: TextCompletion> ProspectResponder<G> {
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn respond(&self, ctx: &ProspectContext) -> ProspectOutcome {
        self.respond_with_cancel(ctx, std::future::pending::<()>()).await
    }

    /// Race the provider attempt against `cancel`; cancellation takes the scripted path.
    pub async fn respond_with_cancel<F>(&self, ctx: &ProspectContext, cancel: F) -> ProspectOutcome
    where
        F: Future<Output = ()>,
    {
        let attempt = tokio::select! {
            biased;
            () = cancel => Err(AttemptFailure::Cancelled),
            result = self.attempt_provider(ctx) => result,
        };

        match attempt {
            Ok(reply) => ProspectOutcome {
                reply,
                path: CoachingPath::Provider,
            },
            Err(failure) => {
                match &failure {
                    AttemptFailure::Provider(LlmError::Unavailable { .. }) => tracing::debug!(
                        provider = self.gateway.provider_name(),
                        reason = %failure,
                        "provider unavailable; using scripted prospect reply"
                    ),
                    _ => tracing::warn!(
                        provider = self.gateway.provider_name(),
                        scenario = %ctx.scenario.id,
                        reason = %failure,
                        "prospect reply failed; using scripted prospect reply"
                    ),
                }
                ProspectOutcome {
                    reply: scripted_reply(ctx),
                    path: CoachingPath::Fallback,
                }
            }
        }
    }

    async fn attempt_provider(&self, ctx: &ProspectContext) -> Result<ProspectReply, AttemptFailure> {
        let prompt = build_prospect_prompt(ctx);
        let system = build_prospect_system_prompt(ctx);

        let text = tokio::time::timeout(self.timeout, self.gateway.generate(&prompt, Some(&system)))
            .await
            .map_err(|_| AttemptFailure::TimedOut(self.timeout))?
            .map_err(AttemptFailure::Provider)?;

        if text.trim().is_empty() {
            return Err(AttemptFailure::Provider(LlmError::Protocol(
                "provider returned an empty reply".to_string(),
            )));
        }
        Ok(parse_prospect_reply(&text))
    }
}
