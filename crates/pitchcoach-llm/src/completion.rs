use std::future::Future;

use crate::error::LlmError;

/// Generic text-completion capability.
///
/// Implementations return the raw completion text. They never retry;
/// wrap calls in `pitchcoach_core::execute_with_retry` when retries are wanted.
pub trait TextCompletion: Send + Sync {
    /// Short identifier used in logs (`claude`, `openai`, `gemini`).
    fn provider_name(&self) -> &str;

    fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}
