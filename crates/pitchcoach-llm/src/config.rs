use std::time::Duration;

use pitchcoach_core::AppConfig;

use crate::error::LlmError;

/// Supported text-generation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Claude,
    OpenAi,
    Gemini,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [ProviderKind::Claude, ProviderKind::Gemini, ProviderKind::OpenAi];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Claude => "claude",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// Name of the environment variable holding this provider's credential.
    #[must_use]
    pub fn key_env_var(self) -> &'static str {
        match self {
            ProviderKind::Claude => "ANTHROPIC_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Gemini => "GOOGLE_GEMINI_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claude" | "anthropic" => Ok(ProviderKind::Claude),
            "openai" => Ok(ProviderKind::OpenAi),
            "gemini" => Ok(ProviderKind::Gemini),
            other => Err(LlmError::Config(format!(
                "{other} provider not supported. Supported providers: claude, gemini, openai."
            ))),
        }
    }
}

/// Base URLs for each backend. Overridden in tests to point at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub anthropic: String,
    pub openai: String,
    pub gemini: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            anthropic: "https://api.anthropic.com".to_string(),
            openai: "https://api.openai.com".to_string(),
            gemini: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub anthropic_model: String,
    pub openai_model: String,
    pub gemini_model: String,
    pub timeout: Duration,
    pub max_tokens: u32,
    pub endpoints: ProviderEndpoints,
}

impl LlmConfig {
    /// Derive the gateway configuration from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] if the configured provider is not supported.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, LlmError> {
        Ok(Self {
            provider: config.llm_provider.parse()?,
            anthropic_api_key: config.anthropic_api_key.clone(),
            openai_api_key: config.openai_api_key.clone(),
            gemini_api_key: config.gemini_api_key.clone(),
            anthropic_model: config.anthropic_model.clone(),
            openai_model: config.openai_model.clone(),
            gemini_model: config.gemini_model.clone(),
            timeout: Duration::from_secs(config.llm_timeout_secs),
            max_tokens: config.llm_max_tokens,
            endpoints: ProviderEndpoints::default(),
        })
    }

    /// Credential configured for `kind`, if any.
    #[must_use]
    pub fn api_key(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::Claude => self.anthropic_api_key.as_deref(),
            ProviderKind::OpenAi => self.openai_api_key.as_deref(),
            ProviderKind::Gemini => self.gemini_api_key.as_deref(),
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("anthropic_api_key", &redact(&self.anthropic_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("anthropic_model", &self.anthropic_model)
            .field("openai_model", &self.openai_model)
            .field("gemini_model", &self.gemini_model)
            .field("timeout", &self.timeout)
            .field("max_tokens", &self.max_tokens)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_aliases() {
        assert_eq!("claude".parse::<ProviderKind>().unwrap(), ProviderKind::Claude);
        assert_eq!("Anthropic".parse::<ProviderKind>().unwrap(), ProviderKind::Claude);
        assert_eq!("OPENAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
    }

    #[test]
    fn unknown_provider_lists_supported() {
        let err = "huggingface".parse::<ProviderKind>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("huggingface"));
        assert!(message.contains("claude, gemini, openai"));
    }
}
