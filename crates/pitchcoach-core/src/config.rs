use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo-preview";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values are treated as unset so `FOO_API_KEY=` in a .env file
    // does not count as a configured credential.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("PITCHCOACH_ENV", "development"));
    let log_level = or_default("PITCHCOACH_LOG_LEVEL", "info");
    let scenarios_path = PathBuf::from(or_default(
        "PITCHCOACH_SCENARIOS_PATH",
        "./config/scenarios.yaml",
    ));
    let database_url = optional("DATABASE_URL");

    let db_max_connections = parse_u32("PITCHCOACH_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("PITCHCOACH_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("PITCHCOACH_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let llm_provider = or_default("PITCHCOACH_LLM_PROVIDER", "claude")
        .trim()
        .to_lowercase();
    let anthropic_api_key = optional("ANTHROPIC_API_KEY");
    let openai_api_key = optional("OPENAI_API_KEY");
    let gemini_api_key = optional("GOOGLE_GEMINI_API_KEY");
    let anthropic_model = or_default("ANTHROPIC_MODEL", DEFAULT_ANTHROPIC_MODEL);
    let openai_model = or_default("OPENAI_MODEL", DEFAULT_OPENAI_MODEL);
    let gemini_model = or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL);

    let llm_timeout_secs = parse_u64("PITCHCOACH_LLM_TIMEOUT_SECS", "8")?;
    if llm_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PITCHCOACH_LLM_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let llm_max_tokens = parse_u32("PITCHCOACH_LLM_MAX_TOKENS", "2000")?;

    let retry_max_attempts = parse_u32("PITCHCOACH_RETRY_MAX_ATTEMPTS", "3")?;
    let retry_initial_delay_ms = parse_u64("PITCHCOACH_RETRY_INITIAL_DELAY_MS", "1000")?;
    let provider_health_ttl_secs = parse_u64("PITCHCOACH_PROVIDER_HEALTH_TTL_SECS", "60")?;

    Ok(AppConfig {
        env,
        log_level,
        scenarios_path,
        database_url,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        llm_provider,
        anthropic_api_key,
        openai_api_key,
        gemini_api_key,
        anthropic_model,
        openai_model,
        gemini_model,
        llm_timeout_secs,
        llm_max_tokens,
        retry_max_attempts,
        retry_initial_delay_ms,
        provider_health_ttl_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
