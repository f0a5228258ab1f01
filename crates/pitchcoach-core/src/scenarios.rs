use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The prospect the rep is talking to in a role-play scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub name: String,
    #[serde(default, alias = "current_solution")]
    pub current_solution: String,
    #[serde(default, alias = "primary_goal")]
    pub primary_goal: String,
}

impl Persona {
    /// One-line description used when embedding the persona in a prompt.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![self.name.clone()];
        if !self.current_solution.trim().is_empty() {
            parts.push(format!("currently uses {}", self.current_solution.trim()));
        }
        if !self.primary_goal.trim().is_empty() {
            parts.push(format!("primary goal: {}", self.primary_goal.trim()));
        }
        parts.join("; ")
    }
}

/// Read-only reference data describing a role-play scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioContext {
    pub id: String,
    #[serde(alias = "objection_category")]
    pub objection_category: String,
    #[serde(default, alias = "key_points")]
    pub key_points: Vec<String>,
    pub persona: Persona,
}

#[derive(Debug, Deserialize)]
pub struct ScenariosFile {
    pub scenarios: Vec<ScenarioContext>,
}

impl ScenariosFile {
    /// Look up a scenario by id (case-insensitive).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ScenarioContext> {
        self.scenarios
            .iter()
            .find(|s| s.id.eq_ignore_ascii_case(id.trim()))
    }
}

/// Load and validate the scenario catalogue from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_scenarios(path: &Path) -> Result<ScenariosFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ScenariosFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_scenarios(&content)
}

/// Parse and validate a scenario catalogue from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text cannot be parsed or fails validation.
pub fn parse_scenarios(content: &str) -> Result<ScenariosFile, ConfigError> {
    let scenarios_file: ScenariosFile =
        serde_yaml::from_str(content).map_err(ConfigError::ScenariosFileParse)?;

    validate_scenarios(&scenarios_file)?;

    Ok(scenarios_file)
}

fn validate_scenarios(scenarios_file: &ScenariosFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for scenario in &scenarios_file.scenarios {
        if scenario.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "scenario id must be non-empty".to_string(),
            ));
        }

        if !seen_ids.insert(scenario.id.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate scenario id: '{}'",
                scenario.id
            )));
        }

        if scenario.key_points.iter().all(|kp| kp.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "scenario '{}' must list at least one key point",
                scenario.id
            )));
        }

        if scenario.key_points.iter().any(|kp| kp.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "scenario '{}' has a blank key point",
                scenario.id
            )));
        }

        if scenario.persona.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "scenario '{}' has a persona without a name",
                scenario.id
            )));
        }
    }

    Ok(())
}
