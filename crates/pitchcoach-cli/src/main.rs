mod coach;
mod db;
mod icp;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::coach::{CoachArgs, RespondArgs};
use crate::db::DbCommands;
use crate::icp::{IcpCommands, RecommendArgs};

#[derive(Debug, Parser)]
#[command(name = "pitchcoach")]
#[command(about = "PitchCoach coaching and account scoring engine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute conversation metrics for a transcript
    Metrics {
        /// Transcript as inline JSON or a path to a JSON file
        #[arg(long)]
        transcript: String,
    },
    /// Coach the rep's current message in a role-play
    Coach(CoachArgs),
    /// Generate the role-play prospect's reply to the rep
    Respond(RespondArgs),
    /// ICP scoring
    Icp {
        #[command(subcommand)]
        command: IcpCommands,
    },
    /// Ranked account recommendations for a user
    Recommend(RecommendArgs),
    /// Record a user's interaction with an account
    Track {
        #[arg(long)]
        user: String,
        #[arg(long)]
        domain: String,
        /// viewed, opened_research, contacted, meeting_booked, deal_won or deal_lost
        #[arg(long)]
        kind: String,
    },
    /// Highest-intent accounts regardless of user
    Intent {
        /// Maximum number of accounts to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Show text-generation provider health
    Providers,
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Read a JSON argument given either inline or as a file path.
pub(crate) fn read_json_arg(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Ok(raw.to_string());
    }
    std::fs::read_to_string(raw).map_err(|e| anyhow::anyhow!("failed to read {raw}: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pitchcoach_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Metrics { transcript }) => coach::run_metrics(&transcript)?,
        Some(Commands::Coach(args)) => coach::run_coach(&config, &args).await?,
        Some(Commands::Respond(args)) => coach::run_respond(&config, &args).await?,
        Some(Commands::Icp { command }) => icp::run_icp(&config, command).await?,
        Some(Commands::Recommend(args)) => icp::run_recommend(&config, &args).await?,
        Some(Commands::Track { user, domain, kind }) => {
            icp::run_track(&config, &user, &domain, &kind).await?;
        }
        Some(Commands::Intent { limit }) => icp::run_intent(&config, limit).await?,
        Some(Commands::Providers) => coach::run_providers(&config)?,
        Some(Commands::Db { command }) => db::run_db(&config, &command).await?,
        None => println!("pitchcoach ready; run with --help to list commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
