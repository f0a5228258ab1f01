use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub scenarios_path: PathBuf,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Raw provider identifier; parsed into a provider kind by `pitchcoach-llm`.
    pub llm_provider: String,
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub anthropic_model: String,
    pub openai_model: String,
    pub gemini_model: String,
    pub llm_timeout_secs: u64,
    pub llm_max_tokens: u32,
    pub retry_max_attempts: u32,
    pub retry_initial_delay_ms: u64,
    pub provider_health_ttl_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("scenarios_path", &self.scenarios_path)
            .field("database_url", &redact(&self.database_url))
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("llm_provider", &self.llm_provider)
            .field("anthropic_api_key", &redact(&self.anthropic_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("anthropic_model", &self.anthropic_model)
            .field("openai_model", &self.openai_model)
            .field("gemini_model", &self.gemini_model)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("llm_max_tokens", &self.llm_max_tokens)
            .field("retry_max_attempts", &self.retry_max_attempts)
            .field("retry_initial_delay_ms", &self.retry_initial_delay_ms)
            .field("provider_health_ttl_secs", &self.provider_health_ttl_secs)
            .finish()
    }
}
