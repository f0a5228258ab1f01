use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    /// The provider has no usable credential or client. No request was sent.
    #[error("{provider} provider unavailable: {reason}")]
    Unavailable { provider: String, reason: String },

    /// Network failure, timeout, rate limit or 5xx. Safe to retry.
    #[error("transient provider error: {0}")]
    Transient(String),

    /// The provider answered, but not with something we can use.
    #[error("provider protocol error: {0}")]
    Protocol(String),

    #[error("invalid LLM configuration: {0}")]
    Config(String),
}

impl LlmError {
    /// Returns `true` for errors worth another attempt.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Transient(_))
    }
}
