//! Shared request/response handling for provider adapters.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::LlmError;

/// Longest slice of an error body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Build the HTTP client shared by all adapters.
///
/// # Errors
///
/// Returns the underlying `reqwest::Error` if the TLS backend cannot be initialised.
pub(crate) fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(5)))
        .user_agent("pitchcoach/0.1 (coaching-engine)")
        .build()
}

/// Send `request` and decode a JSON body of type `R`.
///
/// Network failures, timeouts, HTTP 429 and 5xx map to [`LlmError::Transient`];
/// any other non-success status and undecodable bodies map to
/// [`LlmError::Protocol`].
pub(crate) async fn send_json<R: DeserializeOwned>(
    provider: &str,
    request: RequestBuilder,
) -> Result<R, LlmError> {
    let response = request.send().await.map_err(|e| {
        let kind = if e.is_timeout() {
            "timed out"
        } else if e.is_connect() {
            "connection failed"
        } else {
            "request failed"
        };
        LlmError::Transient(format!("{provider} {kind}: {e}"))
    })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| LlmError::Transient(format!("{provider} body read failed: {e}")))?;

    if !status.is_success() {
        let snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        tracing::warn!(provider, status = status.as_u16(), "provider returned error status");
        if is_retriable_status(status) {
            return Err(LlmError::Transient(format!(
                "{provider} returned HTTP {}",
                status.as_u16()
            )));
        }
        return Err(LlmError::Protocol(format!(
            "{provider} rejected request with HTTP {}: {snippet}",
            status.as_u16()
        )));
    }

    serde_json::from_str(&body)
        .map_err(|e| LlmError::Protocol(format!("{provider} response shape not recognised: {e}")))
}

fn is_retriable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Reject blank completions: callers cannot do anything useful with them.
pub(crate) fn non_empty(provider: &str, text: String) -> Result<String, LlmError> {
    if text.trim().is_empty() {
        Err(LlmError::Protocol(format!("{provider} returned an empty completion")))
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retriable_statuses() {
        assert!(is_retriable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retriable_status(StatusCode::BAD_GATEWAY));
        assert!(is_retriable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_retriable_status(StatusCode::UNAUTHORIZED));
        assert!(!is_retriable_status(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn blank_completion_is_protocol_error() {
        assert!(matches!(
            non_empty("claude", "  \n".to_string()),
            Err(LlmError::Protocol(_))
        ));
        assert_eq!(non_empty("claude", "ok".to_string()).unwrap(), "ok");
    }
}
