use clap::Subcommand;
use pitchcoach_core::AppConfig;

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

pub(crate) async fn run_db(config: &AppConfig, command: &DbCommands) -> anyhow::Result<()> {
    let pool = pitchcoach_db::connect_pool_from_config(config).await?;
    match command {
        DbCommands::Ping => {
            pitchcoach_db::ping(&pool).await?;
            println!("database ok");
        }
        DbCommands::Migrate => {
            let applied = pitchcoach_db::run_migrations(&pool).await?;
            tracing::info!(applied, "migrations complete");
            println!("applied {applied} migration(s)");
        }
    }
    Ok(())
}
