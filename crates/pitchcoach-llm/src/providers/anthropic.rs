//! Anthropic Messages API adapter.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http::{non_empty, send_json};
use crate::error::LlmError;

const API_VERSION: &str = "2023-06-01";
const PROVIDER: &str = "claude";

pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicClient {
    #[must_use]
    pub fn new(client: Client, api_key: &str, model: &str, max_tokens: u32, base_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            max_tokens,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Send a single-turn message and return the concatenated text blocks.
    ///
    /// # Errors
    ///
    /// See [`LlmError`] for the transient/protocol split.
    pub async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
            system,
        };

        tracing::debug!(provider = PROVIDER, model = %self.model, "sending completion request");

        let response: MessagesResponse = send_json(
            PROVIDER,
            self.client
                .post(format!("{}/v1/messages", self.base_url))
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", API_VERSION)
                .json(&request),
        )
        .await?;

        let text: String = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        non_empty(PROVIDER, text)
    }
}
