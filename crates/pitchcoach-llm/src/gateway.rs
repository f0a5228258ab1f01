//! Active-provider selection and dispatch.

use crate::completion::TextCompletion;
use crate::config::{LlmConfig, ProviderKind};
use crate::error::LlmError;
use crate::providers::{build_http_client, AnthropicClient, GeminiClient, OpenAiClient};

/// A constructed backend adapter.
pub enum Provider {
    Anthropic(AnthropicClient),
    OpenAi(OpenAiClient),
    Gemini(GeminiClient),
}

impl Provider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        match self {
            Provider::Anthropic(client) => client.complete(prompt, system).await,
            Provider::OpenAi(client) => client.complete(prompt, system).await,
            Provider::Gemini(client) => client.complete(prompt, system).await,
        }
    }
}

/// The single text-generation entry point used by the coaching engine.
///
/// Built once at start-up. When the active provider has no credential the
/// gateway is still constructed, but every call fails fast with
/// [`LlmError::Unavailable`] without touching the network.
pub struct ProviderGateway {
    kind: ProviderKind,
    provider: Option<Provider>,
}

impl ProviderGateway {
    /// Build the gateway for `config.provider`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Unavailable`] if the HTTP client cannot be built.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let kind = config.provider;
        let Some(api_key) = config.api_key(kind) else {
            tracing::info!(
                provider = %kind,
                env_var = kind.key_env_var(),
                "no credential configured; coaching will use rule-based fallback"
            );
            return Ok(Self::unconfigured(kind));
        };

        let client = build_http_client(config.timeout).map_err(|e| LlmError::Unavailable {
            provider: kind.to_string(),
            reason: format!("HTTP client construction failed: {e}"),
        })?;

        let endpoints = &config.endpoints;
        let provider = match kind {
            ProviderKind::Claude => Provider::Anthropic(AnthropicClient::new(
                client,
                api_key,
                &config.anthropic_model,
                config.max_tokens,
                &endpoints.anthropic,
            )),
            ProviderKind::OpenAi => Provider::OpenAi(OpenAiClient::new(
                client,
                api_key,
                &config.openai_model,
                config.max_tokens,
                &endpoints.openai,
            )),
            ProviderKind::Gemini => Provider::Gemini(GeminiClient::new(
                client,
                api_key,
                &config.gemini_model,
                config.max_tokens,
                &endpoints.gemini,
            )),
        };

        tracing::info!(provider = %kind, "text generation provider configured");
        Ok(Self::new(kind, provider))
    }

    #[must_use]
    pub fn new(kind: ProviderKind, provider: Provider) -> Self {
        Self {
            kind,
            provider: Some(provider),
        }
    }

    /// A gateway whose active provider has no credential.
    #[must_use]
    pub fn unconfigured(kind: ProviderKind) -> Self {
        Self {
            kind,
            provider: None,
        }
    }

    #[must_use]
    pub fn active(&self) -> ProviderKind {
        self.kind
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }
}

impl TextCompletion for ProviderGateway {
    fn provider_name(&self) -> &str {
        self.kind.as_str()
    }

    async fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String, LlmError> {
        let Some(provider) = &self.provider else {
            return Err(LlmError::Unavailable {
                provider: self.kind.to_string(),
                reason: format!("{} is not set", self.kind.key_env_var()),
            });
        };
        provider.complete(prompt, system_prompt).await
    }
}
