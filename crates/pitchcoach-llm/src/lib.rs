//! Text-generation gateway for PitchCoach.
//!
//! One [`TextCompletion`] capability with three interchangeable backends
//! (Anthropic, OpenAI, Gemini). Exactly one backend is active per process;
//! it is chosen once from configuration and injected into callers. Replies
//! are plain text; [`extract_json_object`] recovers the JSON payload that
//! coaching prompts ask for.

pub mod completion;
pub mod config;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod health;
pub mod providers;

pub use completion::TextCompletion;
pub use config::{LlmConfig, ProviderKind};
pub use error::LlmError;
pub use extract::{extract_json_object, parse_json_reply};
pub use gateway::{Provider, ProviderGateway};
pub use health::{validate_api_key, CachedEntry, HealthCache, ProviderHealth};
