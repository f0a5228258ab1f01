use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use pitchcoach_core::Interaction;

/// Research older than this no longer counts as recent.
pub const RECENT_RESEARCH_DAYS: i64 = 30;

/// Mean interaction weight, capped at 1. Zero when there are no interactions.
#[must_use]
pub fn engagement_score<'a, I>(interactions: I) -> f64
where
    I: IntoIterator<Item = &'a Interaction>,
{
    let (total, count) = interactions
        .into_iter()
        .fold((0.0_f64, 0_usize), |(total, count), i| {
            (total + i.interaction_type.weight(), count + 1)
        });
    if count == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = total / count as f64;
    mean.min(1.0)
}

/// Interactions grouped by lowercase account domain.
#[must_use]
pub fn group_by_domain(interactions: &[Interaction]) -> HashMap<String, Vec<&Interaction>> {
    let mut grouped: HashMap<String, Vec<&Interaction>> = HashMap::new();
    for interaction in interactions {
        grouped
            .entry(interaction.account_domain.to_lowercase())
            .or_default()
            .push(interaction);
    }
    grouped
}

/// `true` when `last_research_at` falls within the last [`RECENT_RESEARCH_DAYS`] of `now`.
#[must_use]
pub fn is_recent_research(last_research_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    last_research_at.is_some_and(|at| at > now - Duration::days(RECENT_RESEARCH_DAYS))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pitchcoach_core::InteractionType;

    use super::*;

    fn interaction(domain: &str, kind: InteractionType) -> Interaction {
        Interaction {
            account_domain: domain.to_string(),
            interaction_type: kind,
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn no_interactions_is_zero() {
        assert!(engagement_score(std::iter::empty::<&Interaction>()).abs() < f64::EPSILON);
    }

    #[test]
    fn mean_of_weights() {
        let items = [
            interaction("a.com", InteractionType::Viewed),
            interaction("a.com", InteractionType::Contacted),
        ];
        assert!((engagement_score(&items) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn unknown_types_dilute_engagement() {
        let items = [
            interaction("a.com", InteractionType::DealWon),
            interaction("a.com", InteractionType::Other("webinar".to_string())),
        ];
        assert!((engagement_score(&items) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn grouping_is_case_insensitive() {
        let items = [
            interaction("Acme.com", InteractionType::Viewed),
            interaction("acme.com", InteractionType::Contacted),
            interaction("other.io", InteractionType::Viewed),
        ];
        let grouped = group_by_domain(&items);
        assert_eq!(grouped["acme.com"].len(), 2);
        assert_eq!(grouped["other.io"].len(), 1);
    }

    #[test]
    fn recency_window_is_thirty_days() {
        let now = Utc.with_ymd_and_hms(2026, 6, 30, 0, 0, 0).unwrap();
        assert!(is_recent_research(Some(now - Duration::days(29)), now));
        assert!(!is_recent_research(Some(now - Duration::days(30)), now));
        assert!(!is_recent_research(None, now));
    }
}
