use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::icp::{PriorityFilter, PriorityLevel};

/// Kind of touchpoint a user had with an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    Viewed,
    OpenedResearch,
    Contacted,
    MeetingBooked,
    DealWon,
    DealLost,
    /// Any type this build does not know about. Carries zero engagement weight.
    #[serde(untagged)]
    Other(String),
}

impl InteractionType {
    /// Engagement weight of a single interaction of this type.
    #[must_use]
    pub fn weight(&self) -> f64 {
        match self {
            InteractionType::Viewed => 0.1,
            InteractionType::OpenedResearch => 0.3,
            InteractionType::Contacted => 0.7,
            InteractionType::MeetingBooked => 0.9,
            InteractionType::DealWon => 1.0,
            InteractionType::DealLost => 0.2,
            InteractionType::Other(_) => 0.0,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            InteractionType::Viewed => "viewed",
            InteractionType::OpenedResearch => "opened_research",
            InteractionType::Contacted => "contacted",
            InteractionType::MeetingBooked => "meeting_booked",
            InteractionType::DealWon => "deal_won",
            InteractionType::DealLost => "deal_lost",
            InteractionType::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "viewed" => InteractionType::Viewed,
            "opened_research" => InteractionType::OpenedResearch,
            "contacted" => InteractionType::Contacted,
            "meeting_booked" => InteractionType::MeetingBooked,
            "deal_won" => InteractionType::DealWon,
            "deal_lost" => InteractionType::DealLost,
            other => InteractionType::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub account_domain: String,
    pub interaction_type: InteractionType,
    pub created_at: DateTime<Utc>,
}

/// Persisted per-account signal row, including the last computed ICP score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSignalRecord {
    pub account_domain: String,
    pub company_name: String,
    pub icp_score: Option<i32>,
    pub priority_level: Option<PriorityLevel>,
    pub has_open_engineering_roles: bool,
    pub engineering_role_count: u32,
    pub total_open_roles: u32,
    pub has_engineering_blog: bool,
    pub company_size: Option<u32>,
    pub recent_funding: bool,
    pub tech_stack: Vec<String>,
    pub last_research_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSignals {
    pub has_open_engineering_roles: bool,
    pub engineering_role_count: u32,
    /// Last research update is less than 30 days old.
    pub recent_research: bool,
    /// Normalized engagement in `[0, 1]`.
    pub user_engagement: f64,
}

/// A ranked account suggestion. Derived per request; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecommendation {
    pub account_domain: String,
    pub company_name: String,
    pub icp_score: i32,
    pub priority_level: PriorityLevel,
    pub intent_signals: IntentSignals,
    pub reasoning: Vec<String>,
    pub last_research_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationOptions {
    pub limit: usize,
    pub min_icp_score: i32,
    pub priority_filter: PriorityFilter,
    /// Keep accounts the user already interacted with.
    pub include_engaged: bool,
}

impl Default for RecommendationOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            min_icp_score: 6,
            priority_filter: PriorityFilter::All,
            include_engaged: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_type_round_trips_known_and_unknown() {
        let known: InteractionType = serde_json::from_str(r#""meeting_booked""#).unwrap();
        assert_eq!(known, InteractionType::MeetingBooked);
        let unknown: InteractionType = serde_json::from_str(r#""webinar""#).unwrap();
        assert_eq!(unknown, InteractionType::Other("webinar".to_string()));
        assert!(unknown.weight().abs() < f64::EPSILON);
    }

    #[test]
    fn parse_matches_serde_names() {
        for raw in [
            "viewed",
            "opened_research",
            "contacted",
            "meeting_booked",
            "deal_won",
            "deal_lost",
        ] {
            assert_eq!(InteractionType::parse(raw).as_str(), raw);
        }
    }

    #[test]
    fn default_options() {
        let opts = RecommendationOptions::default();
        assert_eq!(opts.limit, 10);
        assert_eq!(opts.min_icp_score, 6);
        assert_eq!(opts.priority_filter, PriorityFilter::All);
        assert!(!opts.include_engaged);
    }
}
