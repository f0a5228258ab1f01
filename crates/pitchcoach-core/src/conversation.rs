use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Speaker of a transcript message.
///
/// The AI-played prospect is labelled `agent` by some callers; it
/// deserializes as [`Role::Prospect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Rep,
    #[serde(alias = "agent")]
    Prospect,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Rep => write!(f, "rep"),
            Role::Prospect => write!(f, "prospect"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rep" => Ok(Role::Rep),
            "prospect" | "agent" => Ok(Role::Prospect),
            other => Err(CoreError::Validation(format!(
                "unknown conversation role '{other}'; expected rep or prospect"
            ))),
        }
    }
}

/// One recorded turn. A transcript is an ordered `[ConversationMessage]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    #[serde(alias = "message")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ConversationMessage {
    #[must_use]
    pub fn rep(text: impl Into<String>) -> Self {
        Self {
            role: Role::Rep,
            text: text.into(),
            timestamp: None,
        }
    }

    #[must_use]
    pub fn prospect(text: impl Into<String>) -> Self {
        Self {
            role: Role::Prospect,
            text: text.into(),
            timestamp: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_role_deserializes_as_prospect() {
        let msg: ConversationMessage =
            serde_json::from_str(r#"{"role":"agent","message":"Not sure we need this."}"#)
                .unwrap();
        assert_eq!(msg.role, Role::Prospect);
        assert_eq!(msg.text, "Not sure we need this.");
        assert!(msg.timestamp.is_none());
    }

    #[test]
    fn role_from_str_rejects_unknown() {
        let err = "moderator".parse::<Role>().unwrap_err();
        assert!(err.to_string().contains("moderator"));
    }

    #[test]
    fn role_from_str_is_case_insensitive() {
        assert_eq!("REP".parse::<Role>().unwrap(), Role::Rep);
        assert_eq!(" Agent ".parse::<Role>().unwrap(), Role::Prospect);
    }
}
