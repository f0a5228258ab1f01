//! Shared domain types, configuration and cross-cutting helpers for PitchCoach.

pub mod accounts;
pub mod app_config;
pub mod clock;
pub mod config;
pub mod conversation;
pub mod icp;
pub mod retry;
pub mod scenarios;
pub mod store;

use thiserror::Error;

pub use accounts::{
    AccountRecommendation, AccountSignalRecord, IntentSignals, Interaction, InteractionType,
    RecommendationOptions,
};
pub use app_config::{AppConfig, Environment};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{load_app_config, load_app_config_from_env};
pub use conversation::{ConversationMessage, Role};
pub use icp::{IcpFeatures, IcpScoreResult, IcpSignal, PriorityFilter, PriorityLevel};
pub use retry::execute_with_retry;
pub use scenarios::{load_scenarios, Persona, ScenarioContext, ScenariosFile};
pub use store::{AccountStore, CandidateQuery};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read scenarios file {path}: {source}")]
    ScenariosFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenarios file: {0}")]
    ScenariosFileParse(#[source] serde_yaml::Error),

    #[error("scenario validation failed: {0}")]
    Validation(String),
}
