use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    /// Priority bucket for a clamped ICP score: `>= 8` high, `>= 5` medium.
    #[must_use]
    pub fn from_score(score: i32) -> Self {
        if score >= 8 {
            PriorityLevel::High
        } else if score >= 5 {
            PriorityLevel::Medium
        } else {
            PriorityLevel::Low
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PriorityLevel::High => "high",
            PriorityLevel::Medium => "medium",
            PriorityLevel::Low => "low",
        }
    }
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PriorityLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(PriorityLevel::High),
            "medium" => Ok(PriorityLevel::Medium),
            "low" => Ok(PriorityLevel::Low),
            other => Err(CoreError::Validation(format!(
                "unknown priority level '{other}'; expected high, medium or low"
            ))),
        }
    }
}

/// Priority restriction applied when listing recommendation candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(PriorityLevel),
}

impl PriorityFilter {
    #[must_use]
    pub fn level(self) -> Option<PriorityLevel> {
        match self {
            PriorityFilter::All => None,
            PriorityFilter::Only(level) => Some(level),
        }
    }
}

impl std::str::FromStr for PriorityFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(PriorityFilter::All);
        }
        s.parse::<PriorityLevel>().map(PriorityFilter::Only)
    }
}

/// Raw account signals fed to the ICP scorer. Absent fields mean "unknown"
/// and are treated as zero / false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IcpSignal {
    pub account_domain: String,
    pub engineering_role_count: Option<u32>,
    pub has_open_engineering_roles: Option<bool>,
    pub total_open_roles: Option<u32>,
    pub has_engineering_blog: Option<bool>,
    pub company_size: Option<u32>,
    pub recent_funding: Option<bool>,
    /// Share of the target tech stack the account uses, in `[0, 1]`.
    pub tech_stack_alignment: Option<f64>,
}

/// The normalized feature record an ICP score was computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcpFeatures {
    pub engineering_role_count: u32,
    pub has_open_engineering_roles: bool,
    pub total_open_roles: u32,
    pub has_engineering_blog: bool,
    pub company_size: u32,
    pub recent_funding: bool,
    pub tech_stack_alignment: f64,
}

impl From<&IcpSignal> for IcpFeatures {
    fn from(signal: &IcpSignal) -> Self {
        let alignment = signal.tech_stack_alignment.unwrap_or(0.0);
        Self {
            engineering_role_count: signal.engineering_role_count.unwrap_or(0),
            has_open_engineering_roles: signal.has_open_engineering_roles.unwrap_or(false),
            total_open_roles: signal.total_open_roles.unwrap_or(0),
            has_engineering_blog: signal.has_engineering_blog.unwrap_or(false),
            company_size: signal.company_size.unwrap_or(0),
            recent_funding: signal.recent_funding.unwrap_or(false),
            tech_stack_alignment: if alignment.is_finite() {
                alignment.clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcpScoreResult {
    /// Integer score in `[1, 10]`.
    pub score: i32,
    pub priority_level: PriorityLevel,
    /// Share of populated data points, in `[0, 1]`.
    pub confidence: f64,
    pub reasoning: Vec<String>,
    pub features: IcpFeatures,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_thresholds() {
        assert_eq!(PriorityLevel::from_score(10), PriorityLevel::High);
        assert_eq!(PriorityLevel::from_score(8), PriorityLevel::High);
        assert_eq!(PriorityLevel::from_score(7), PriorityLevel::Medium);
        assert_eq!(PriorityLevel::from_score(5), PriorityLevel::Medium);
        assert_eq!(PriorityLevel::from_score(4), PriorityLevel::Low);
        assert_eq!(PriorityLevel::from_score(1), PriorityLevel::Low);
    }

    #[test]
    fn empty_json_signal_deserializes_to_defaults() {
        let signal: IcpSignal = serde_json::from_str("{}").unwrap();
        assert_eq!(signal, IcpSignal::default());
        let features = IcpFeatures::from(&signal);
        assert_eq!(features, IcpFeatures::default());
    }

    #[test]
    fn alignment_is_clamped_when_normalized() {
        let signal = IcpSignal {
            tech_stack_alignment: Some(3.5),
            ..IcpSignal::default()
        };
        assert!((IcpFeatures::from(&signal).tech_stack_alignment - 1.0).abs() < f64::EPSILON);

        let nan = IcpSignal {
            tech_stack_alignment: Some(f64::NAN),
            ..IcpSignal::default()
        };
        assert!(IcpFeatures::from(&nan).tech_stack_alignment.abs() < f64::EPSILON);
    }

    #[test]
    fn priority_filter_parses_all_and_levels() {
        assert_eq!("all".parse::<PriorityFilter>().unwrap(), PriorityFilter::All);
        assert_eq!(
            "High".parse::<PriorityFilter>().unwrap(),
            PriorityFilter::Only(PriorityLevel::High)
        );
        assert!("urgent".parse::<PriorityFilter>().is_err());
    }
}
