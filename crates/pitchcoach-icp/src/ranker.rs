//! Personalized account recommendations from stored ICP scores and user
//! interaction history.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use pitchcoach_core::{
    AccountRecommendation, AccountSignalRecord, AccountStore, CandidateQuery, Clock,
    IntentSignals, PriorityLevel, RecommendationOptions,
};

use crate::engagement::{engagement_score, group_by_domain, is_recent_research};

/// Candidates fetched per requested recommendation, leaving room for post-filtering.
const CANDIDATE_OVERFETCH: usize = 3;
/// Minimum ICP score for non-personalized intent recommendations.
pub const INTENT_MIN_ICP_SCORE: i32 = 7;

const HIGH_ICP_SCORE: i32 = 8;
const HIGH_ENGAGEMENT: f64 = 0.5;

fn reasoning(icp_score: i32, hiring: bool, recent_research: bool, engagement: f64) -> Vec<String> {
    let mut reasons = Vec::new();
    if icp_score >= HIGH_ICP_SCORE {
        reasons.push("High ICP score".to_string());
    }
    if hiring {
        reasons.push("Active engineering hiring".to_string());
    }
    if recent_research {
        reasons.push("Recently researched".to_string());
    }
    if engagement > HIGH_ENGAGEMENT {
        reasons.push("High user engagement".to_string());
    }
    reasons
}

fn recommendation(
    record: AccountSignalRecord,
    engagement: f64,
    now: DateTime<Utc>,
) -> AccountRecommendation {
    let icp_score = record.icp_score.unwrap_or(0);
    let recent_research = is_recent_research(record.last_research_at, now);

    AccountRecommendation {
        reasoning: reasoning(
            icp_score,
            record.has_open_engineering_roles,
            recent_research,
            engagement,
        ),
        priority_level: record
            .priority_level
            .unwrap_or_else(|| PriorityLevel::from_score(icp_score)),
        intent_signals: IntentSignals {
            has_open_engineering_roles: record.has_open_engineering_roles,
            engineering_role_count: record.engineering_role_count,
            recent_research,
            user_engagement: engagement,
        },
        icp_score,
        account_domain: record.account_domain,
        company_name: record.company_name,
        last_research_at: record.last_research_at,
    }
}

/// ICP score descending, then engagement descending, then most recent research
/// first with never-researched accounts last.
fn ranking_order(a: &AccountRecommendation, b: &AccountRecommendation) -> Ordering {
    b.icp_score
        .cmp(&a.icp_score)
        .then_with(|| {
            b.intent_signals
                .user_engagement
                .total_cmp(&a.intent_signals.user_engagement)
        })
        .then_with(|| b.last_research_at.cmp(&a.last_research_at))
}

pub struct RecommendationRanker<S, C> {
    store: S,
    clock: C,
}

impl<S: AccountStore, C: Clock> RecommendationRanker<S, C> {
    #[must_use]
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Rank candidate accounts for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns the store error if interactions or candidates cannot be loaded.
    pub async fn rank(
        &self,
        user_id: &str,
        options: RecommendationOptions,
    ) -> Result<Vec<AccountRecommendation>, S::Error> {
        if options.limit == 0 {
            return Ok(Vec::new());
        }

        let interactions = self.store.list_interactions(user_id).await?;
        let by_domain = group_by_domain(&interactions);
        let engaged: HashSet<&str> = by_domain.keys().map(String::as_str).collect();

        let candidates = self
            .store
            .list_candidates(CandidateQuery {
                min_icp_score: options.min_icp_score,
                priority: options.priority_filter,
                limit: options.limit.saturating_mul(CANDIDATE_OVERFETCH),
            })
            .await?;
        let fetched = candidates.len();

        let now = self.clock.now();
        let mut ranked: Vec<AccountRecommendation> = candidates
            .into_iter()
            .filter(|record| {
                options.include_engaged
                    || !engaged.contains(record.account_domain.to_lowercase().as_str())
            })
            .map(|record| {
                let engagement = by_domain
                    .get(&record.account_domain.to_lowercase())
                    .map_or(0.0, |items| engagement_score(items.iter().copied()));
                recommendation(record, engagement, now)
            })
            .collect();

        ranked.sort_by(ranking_order);
        ranked.truncate(options.limit);

        tracing::debug!(
            user_id,
            interactions = interactions.len(),
            candidates = fetched,
            returned = ranked.len(),
            "ranked account recommendations"
        );
        Ok(ranked)
    }

    /// [`Self::rank`], degrading to an empty list when the store fails.
    pub async fn recommend(
        &self,
        user_id: &str,
        options: RecommendationOptions,
    ) -> Vec<AccountRecommendation> {
        match self.rank(user_id, options).await {
            Ok(ranked) => ranked,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "recommendation ranking failed; returning none");
                Vec::new()
            }
        }
    }

    /// Non-personalized list: hiring accounts with an ICP score of at least
    /// [`INTENT_MIN_ICP_SCORE`], best score and most open roles first.
    ///
    /// # Errors
    ///
    /// Returns the store error if candidates cannot be loaded.
    pub async fn top_by_intent(&self, limit: usize) -> Result<Vec<AccountRecommendation>, S::Error> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let records = self
            .store
            .list_intent_accounts(INTENT_MIN_ICP_SCORE, limit)
            .await?;

        let now = self.clock.now();
        let mut ranked: Vec<AccountRecommendation> = records
            .into_iter()
            .filter(|r| r.has_open_engineering_roles && r.icp_score.unwrap_or(0) >= INTENT_MIN_ICP_SCORE)
            .map(|record| recommendation(record, 0.0, now))
            .collect();

        ranked.sort_by(|a, b| {
            b.icp_score.cmp(&a.icp_score).then_with(|| {
                b.intent_signals
                    .engineering_role_count
                    .cmp(&a.intent_signals.engineering_role_count)
            })
        });
        ranked.truncate(limit);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 20, 9, 0, 0).unwrap()
    }

    fn rec(domain: &str, icp: i32, engagement: f64, research_days_ago: Option<i64>) -> AccountRecommendation {
        let record = AccountSignalRecord {
            account_domain: domain.to_string(),
            company_name: domain.to_uppercase(),
            icp_score: Some(icp),
            last_research_at: research_days_ago.map(|d| now() - Duration::days(d)),
            ..AccountSignalRecord::default()
        };
        recommendation(record, engagement, now())
    }

    #[test]
    fn reasoning_lists_each_signal() {
        assert_eq!(
            reasoning(9, true, true, 0.8),
            vec![
                "High ICP score",
                "Active engineering hiring",
                "Recently researched",
                "High user engagement"
            ]
        );
        assert!(reasoning(7, false, false, 0.5).is_empty());
    }

    #[test]
    fn missing_priority_is_derived_from_score() {
        assert_eq!(rec("a.com", 9, 0.0, None).priority_level, PriorityLevel::High);
        assert_eq!(rec("b.com", 6, 0.0, None).priority_level, PriorityLevel::Medium);
    }

    #[test]
    fn order_is_score_then_engagement_then_recency() {
        let mut items = vec![
            rec("never.com", 8, 0.3, None),
            rec("old.com", 8, 0.3, Some(40)),
            rec("fresh.com", 8, 0.3, Some(2)),
            rec("engaged.com", 8, 0.9, None),
            rec("top.com", 9, 0.0, None),
        ];
        items.sort_by(ranking_order);
        let order: Vec<_> = items.iter().map(|r| r.account_domain.as_str()).collect();
        assert_eq!(order, vec!["top.com", "engaged.com", "fresh.com", "old.com", "never.com"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let mut items = vec![rec("first.com", 7, 0.1, None), rec("second.com", 7, 0.1, None)];
        items.sort_by(ranking_order);
        assert_eq!(items[0].account_domain, "first.com");
    }
}
