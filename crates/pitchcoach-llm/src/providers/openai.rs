//! OpenAI Chat Completions adapter.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http::{non_empty, send_json};
use crate::error::LlmError;

const PROVIDER: &str = "openai";
const TEMPERATURE: f32 = 0.7;

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
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

    /// Run one chat completion and return the first choice's content.
    ///
    /// # Errors
    ///
    /// See [`LlmError`] for the transient/protocol split.
    pub async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(provider = PROVIDER, model = %self.model, "sending completion request");

        let response: ChatResponse = send_json(
            PROVIDER,
            self.client
                .post(format!("{}/v1/chat/completions", self.base_url))
                .bearer_auth(&self.api_key)
                .json(&request),
        )
        .await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::Protocol(format!("{PROVIDER} returned no choices")))?;

        non_empty(PROVIDER, text)
    }
}
