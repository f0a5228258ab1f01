//! Backend adapters. Each one differs only in request/response shape and
//! returns the completion as plain text.

mod anthropic;
mod gemini;
mod http;
mod openai;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

pub(crate) use http::build_http_client;
