//! Conversation metrics, coaching, prospect replies and provider health commands.

use std::time::Duration;

use clap::Args;
use pitchcoach_coaching::{
    compute_metrics, talk_to_listen_recommendation, CoachingContext, CoachingOrchestrator,
    Difficulty, Personality, ProspectContext, ProspectResponder, ProspectSettings,
    SalesMethodology,
};
use pitchcoach_core::{
    load_scenarios, AppConfig, ConversationMessage, CoreError, Role, ScenarioContext, SystemClock,
};
use pitchcoach_llm::{HealthCache, LlmConfig, ProviderGateway};

use crate::{print_json, read_json_arg};

#[derive(Debug, Args)]
pub struct CoachArgs {
    /// Transcript so far as inline JSON or a path to a JSON file
    #[arg(long)]
    pub transcript: String,
    /// Scenario id from the scenario catalogue
    #[arg(long)]
    pub scenario: String,
    /// The rep's current message
    #[arg(long)]
    pub message: String,
    /// Turn number; defaults to one past the rep turns in the transcript
    #[arg(long)]
    pub turn: Option<u32>,
    /// Product value keyword checked by rule-based coaching (repeatable)
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Args)]
pub struct RespondArgs {
    /// Transcript so far as inline JSON or a path to a JSON file
    #[arg(long)]
    pub transcript: String,
    /// Scenario id from the scenario catalogue
    #[arg(long)]
    pub scenario: String,
    /// The rep's latest message
    #[arg(long)]
    pub message: String,
    /// easy, medium, hard or expert
    #[arg(long, default_value = "medium")]
    pub difficulty: Difficulty,
    /// friendly, professional, skeptical, abrasive or hostile
    #[arg(long, default_value = "professional")]
    pub personality: Personality,
    /// GAP, SPIN, MEDDIC or BANT
    #[arg(long)]
    pub methodology: Option<SalesMethodology>,
}

fn parse_transcript(raw: &str) -> anyhow::Result<Vec<ConversationMessage>> {
    let json = read_json_arg(raw)?;
    serde_json::from_str(&json).map_err(|e| anyhow::anyhow!("invalid transcript JSON: {e}"))
}

fn default_turn(transcript: &[ConversationMessage]) -> u32 {
    let rep_turns = transcript.iter().filter(|m| m.role == Role::Rep).count();
    u32::try_from(rep_turns).unwrap_or(u32::MAX).saturating_add(1)
}

/// Print metrics for a transcript together with the talk-ratio advice.
pub(crate) fn run_metrics(transcript: &str) -> anyhow::Result<()> {
    let transcript = parse_transcript(transcript)?;
    let metrics = compute_metrics(&transcript);
    let recommendation = talk_to_listen_recommendation(
        metrics.talk_to_listen.ratio,
        metrics.talk_to_listen.status,
    );

    print_json(&serde_json::json!({
        "metrics": metrics,
        "recommendation": recommendation,
    }))
}

/// Coach one rep message. Ctrl-C while the provider is working switches to
/// rule-based coaching.
pub(crate) async fn run_coach(config: &AppConfig, args: &CoachArgs) -> anyhow::Result<()> {
    if args.message.trim().is_empty() {
        return Err(CoreError::Validation("message must not be empty".to_string()).into());
    }

    let scenario = find_scenario(config, &args.scenario)?;

    let transcript = parse_transcript(&args.transcript)?;
    let turn_number = args.turn.unwrap_or_else(|| default_turn(&transcript));

    let llm_config = LlmConfig::from_app_config(config)?;
    let gateway = ProviderGateway::from_config(&llm_config)?;
    let orchestrator = CoachingOrchestrator::new(gateway).with_value_keywords(args.keywords.clone());

    let ctx = CoachingContext {
        user_message: args.message.clone(),
        transcript,
        scenario,
        turn_number,
    };

    let outcome = orchestrator.coach_with_cancel(&ctx, ctrl_c()).await;

    print_json(&outcome)
}

/// Generate the prospect's reply to the rep's latest message. Ctrl-C while
/// the provider is working switches to a scripted reply.
pub(crate) async fn run_respond(config: &AppConfig, args: &RespondArgs) -> anyhow::Result<()> {
    if args.message.trim().is_empty() {
        return Err(CoreError::Validation("message must not be empty".to_string()).into());
    }

    let scenario = find_scenario(config, &args.scenario)?;
    let transcript = parse_transcript(&args.transcript)?;

    let llm_config = LlmConfig::from_app_config(config)?;
    let responder = ProspectResponder::new(ProviderGateway::from_config(&llm_config)?);

    let ctx = ProspectContext {
        scenario,
        transcript,
        rep_message: args.message.clone(),
        settings: ProspectSettings {
            difficulty: args.difficulty,
            personality: args.personality,
            methodology: args.methodology,
        },
    };
    let outcome = responder.respond_with_cancel(&ctx, ctrl_c()).await;

    print_json(&outcome)
}

fn find_scenario(config: &AppConfig, id: &str) -> anyhow::Result<ScenarioContext> {
    let catalogue = load_scenarios(&config.scenarios_path)?;
    let scenario = catalogue
        .get(id)
        .cloned()
        .ok_or_else(|| CoreError::Validation(format!("scenario '{id}' not found")))?;
    Ok(scenario)
}

async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Print credential health for every supported provider.
pub(crate) fn run_providers(config: &AppConfig) -> anyhow::Result<()> {
    let llm_config = LlmConfig::from_app_config(config)?;
    let cache = HealthCache::new(
        SystemClock,
        Duration::from_secs(config.provider_health_ttl_secs),
    );

    print_json(&serde_json::json!({
        "active": llm_config.provider.as_str(),
        "providers": cache.check_all(&llm_config),
    }))
}
