//! ICP scoring and account recommendation commands.

use clap::{Args, Subcommand};
use pitchcoach_core::{
    AccountStore, AppConfig, IcpSignal, InteractionType, PriorityFilter, RecommendationOptions,
    SystemClock,
};
use pitchcoach_db::PgAccountStore;
use pitchcoach_icp::{score_icp, IcpService, RecommendationRanker};

use crate::{print_json, read_json_arg};

/// Sub-commands available under `icp`.
#[derive(Debug, Subcommand)]
pub enum IcpCommands {
    /// Score a raw signal record without touching the database
    Score {
        /// Signal as inline JSON or a path to a JSON file
        #[arg(long)]
        signal: String,
    },
    /// Re-score stored accounts and persist the results
    Rescore {
        /// Account domains to re-score
        #[arg(required = true)]
        domains: Vec<String>,
    },
}

#[derive(Debug, Args)]
pub struct RecommendArgs {
    /// User the recommendations are personalized for
    #[arg(long)]
    pub user: String,
    /// Maximum number of accounts to return
    #[arg(long, default_value = "10")]
    pub limit: usize,
    /// Minimum stored ICP score
    #[arg(long, default_value = "6")]
    pub min_score: i32,
    /// Priority filter: all, high, medium or low
    #[arg(long, default_value = "all")]
    pub priority: PriorityFilter,
    /// Keep accounts the user already interacted with
    #[arg(long)]
    pub include_engaged: bool,
}

impl RecommendArgs {
    fn options(&self) -> RecommendationOptions {
        RecommendationOptions {
            limit: self.limit,
            min_icp_score: self.min_score,
            priority_filter: self.priority,
            include_engaged: self.include_engaged,
        }
    }
}

async fn connect_store(config: &AppConfig) -> anyhow::Result<PgAccountStore> {
    let pool = pitchcoach_db::connect_pool_from_config(config).await?;
    Ok(PgAccountStore::new(pool))
}

pub(crate) async fn run_icp(config: &AppConfig, command: IcpCommands) -> anyhow::Result<()> {
    match command {
        IcpCommands::Score { signal } => {
            let json = read_json_arg(&signal)?;
            let signal: IcpSignal = serde_json::from_str(&json)
                .map_err(|e| anyhow::anyhow!("invalid signal JSON: {e}"))?;
            print_json(&score_icp(&signal))
        }
        IcpCommands::Rescore { domains } => {
            let store = connect_store(config).await?;
            let service = IcpService::new(store)
                .with_retry(config.retry_max_attempts, config.retry_initial_delay_ms);
            let scored = service.score_domains(&domains).await;

            let skipped: Vec<String> = domains
                .iter()
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !scored.contains_key(d))
                .collect();
            if !skipped.is_empty() {
                tracing::warn!(?skipped, "some domains were not scored");
            }
            print_json(&scored)
        }
    }
}

pub(crate) async fn run_recommend(config: &AppConfig, args: &RecommendArgs) -> anyhow::Result<()> {
    let store = connect_store(config).await?;
    let ranker = RecommendationRanker::new(store, SystemClock);
    let ranked = ranker.rank(&args.user, args.options()).await?;
    print_json(&ranked)
}

pub(crate) async fn run_intent(config: &AppConfig, limit: usize) -> anyhow::Result<()> {
    let store = connect_store(config).await?;
    let ranker = RecommendationRanker::new(store, SystemClock);
    let accounts = ranker.top_by_intent(limit).await?;
    print_json(&accounts)
}

pub(crate) async fn run_track(
    config: &AppConfig,
    user: &str,
    domain: &str,
    kind: &str,
) -> anyhow::Result<()> {
    let interaction_type = InteractionType::parse(kind.trim());
    if let InteractionType::Other(raw) = &interaction_type {
        tracing::warn!(kind = %raw, "unknown interaction type; it carries no engagement weight");
    }

    let store = connect_store(config).await?;
    store.record_interaction(user, domain, &interaction_type).await?;
    println!(
        "recorded {} for {user} on {}",
        interaction_type.as_str(),
        domain.trim().to_lowercase()
    );
    Ok(())
}
