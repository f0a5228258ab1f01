//! Coaching orchestration: one provider attempt, rule-based fallback, normalized output.

use std::future::Future;
use std::time::Duration;

use pitchcoach_llm::{parse_json_reply, LlmError, TextCompletion};

use crate::fallback::{fallback_coaching, DEFAULT_VALUE_KEYWORDS};
use crate::metrics::compute;
use crate::normalize::{normalize, RawCoachingReply};
use crate::prompt::{build_coaching_prompt, SYSTEM_PROMPT};
use crate::types::{CoachingAnalysis, CoachingContext, CoachingOutcome, CoachingPath};

/// Upper bound on a single provider attempt.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Why the provider path was abandoned.
#[derive(Debug)]
pub(crate) enum AttemptFailure {
    Provider(LlmError),
    TimedOut(Duration),
    Cancelled,
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptFailure::Provider(e) => write!(f, "{e}"),
            AttemptFailure::TimedOut(limit) => {
                write!(f, "provider did not answer within {}ms", limit.as_millis())
            }
            AttemptFailure::Cancelled => f.write_str("request cancelled"),
        }
    }
}

/// Produces coaching for a rep turn. Never fails: every provider problem is
/// absorbed by the deterministic fallback.
pub struct CoachingOrchestrator<G: TextCompletion> {
    gateway: G,
    timeout: Duration,
    value_keywords: Vec<String>,
}

impl<G: TextCompletion> CoachingOrchestrator<G> {
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
            value_keywords: DEFAULT_VALUE_KEYWORDS
                .iter()
                .map(|kw| (*kw).to_string())
                .collect(),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the product keywords the fallback looks for. An empty list keeps the defaults.
    #[must_use]
    pub fn with_value_keywords(mut self, keywords: Vec<String>) -> Self {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|kw| kw.trim().to_string())
            .filter(|kw| !kw.is_empty())
            .collect();
        if !keywords.is_empty() {
            self.value_keywords = keywords;
        }
        self
    }

    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Coaching feedback for the rep's current message.
    pub async fn analyze_and_coach(&self, ctx: &CoachingContext) -> CoachingAnalysis {
        self.coach(ctx).await.analysis
    }

    /// Like [`Self::analyze_and_coach`], also reporting which path produced the result.
    pub async fn coach(&self, ctx: &CoachingContext) -> CoachingOutcome {
        self.coach_with_cancel(ctx, std::future::pending::<()>()).await
    }

    /// Race the provider attempt against `cancel`; cancellation takes the fallback path.
    pub async fn coach_with_cancel<F>(&self, ctx: &CoachingContext, cancel: F) -> CoachingOutcome
    where
        F: Future<Output = ()>,
    {
        let attempt = tokio::select! {
            biased;
            () = cancel => Err(AttemptFailure::Cancelled),
            result = self.attempt_provider(ctx) => result,
        };

        match attempt {
            Ok(analysis) => {
                tracing::debug!(
                    provider = self.gateway.provider_name(),
                    scenario = %ctx.scenario.id,
                    turn = ctx.turn_number,
                    overall_score = analysis.overall_score,
                    "coaching produced by provider"
                );
                CoachingOutcome {
                    analysis,
                    path: CoachingPath::Provider,
                }
            }
            Err(failure) => {
                match &failure {
                    AttemptFailure::Provider(LlmError::Unavailable { .. }) => tracing::debug!(
                        provider = self.gateway.provider_name(),
                        reason = %failure,
                        "provider unavailable; using rule-based coaching"
                    ),
                    _ => tracing::warn!(
                        provider = self.gateway.provider_name(),
                        scenario = %ctx.scenario.id,
                        reason = %failure,
                        "provider coaching failed; using rule-based coaching"
                    ),
                }
                CoachingOutcome {
                    analysis: fallback_coaching(ctx, &self.value_keywords),
                    path: CoachingPath::Fallback,
                }
            }
        }
    }

    async fn attempt_provider(&self, ctx: &CoachingContext) -> Result<CoachingAnalysis, AttemptFailure> {
        let metrics = compute(&ctx.transcript);
        let prompt = build_coaching_prompt(ctx, &metrics);

        let text = tokio::time::timeout(self.timeout, self.gateway.generate(&prompt, Some(SYSTEM_PROMPT)))
            .await
            .map_err(|_| AttemptFailure::TimedOut(self.timeout))?
            .map_err(AttemptFailure::Provider)?;

        let raw: RawCoachingReply = parse_json_reply(&text).map_err(AttemptFailure::Provider)?;
        Ok(normalize(raw))
    }
}
