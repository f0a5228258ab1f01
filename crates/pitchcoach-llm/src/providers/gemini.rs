//! Google Gemini `generateContent` adapter.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http::{non_empty, send_json};
use crate::error::LlmError;

const PROVIDER: &str = "gemini";

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
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

    /// Generate content for a single user turn and return the first
    /// candidate's text parts joined together.
    ///
    /// # Errors
    ///
    /// See [`LlmError`] for the transient/protocol split.
    pub async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        let request = GenerateRequest {
            contents: [Content {
                role: Some("user"),
                parts: [Part { text: prompt }],
            }],
            system_instruction: system.map(|text| Content {
                role: None,
                parts: [Part { text }],
            }),
            generation_config: GenerationConfig {
                max_output_tokens: self.max_tokens,
            },
        };

        tracing::debug!(provider = PROVIDER, model = %self.model, "sending completion request");

        // Key goes in a header rather than the query string so it never shows up in URL logs.
        let response: GenerateResponse = send_json(
            PROVIDER,
            self.client
                .post(format!(
                    "{}/v1beta/models/{}:generateContent",
                    self.base_url, self.model
                ))
                .header("x-goog-api-key", &self.api_key)
                .json(&request),
        )
        .await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| LlmError::Protocol(format!("{PROVIDER} returned no candidates")))?;

        non_empty(PROVIDER, text)
    }
}
