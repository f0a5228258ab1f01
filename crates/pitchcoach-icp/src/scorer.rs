//! Rule-based Ideal Customer Profile scorer.
//!
//! Additive point system starting from a neutral baseline. The raw total is
//! rounded, then clamped to `[1, 10]`; totals above 10 are clamped rather
//! than renormalized.

use pitchcoach_core::{AccountSignalRecord, IcpFeatures, IcpScoreResult, IcpSignal, PriorityLevel};

const BASELINE: f64 = 5.0;
const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 10.0;

const OPEN_ROLES_POINTS: f64 = 2.0;
const HIRING_VOLUME_POINTS: f64 = 1.0;
const HIRING_VOLUME_THRESHOLD: u32 = 5;
const LARGE_COMPANY_POINTS: f64 = 1.0;
const LARGE_COMPANY_THRESHOLD: u32 = 200;
const SMALL_COMPANY_PENALTY: f64 = 1.0;
const SMALL_COMPANY_THRESHOLD: u32 = 50;
const FUNDING_POINTS: f64 = 1.5;
const BLOG_POINTS: f64 = 0.5;
const ALIGNMENT_POINTS: f64 = 1.0;
const ALIGNMENT_THRESHOLD: f64 = 0.7;

/// Technologies needed for full tech-stack alignment.
const FULL_ALIGNMENT_TECH_COUNT: f64 = 10.0;

/// Score an account's signals. Pure and total: missing fields count as zero / false.
#[must_use]
pub fn score(signal: &IcpSignal) -> IcpScoreResult {
    let features = IcpFeatures::from(signal);
    let mut points = BASELINE;
    let mut reasoning = Vec::new();

    if features.has_open_engineering_roles {
        points += OPEN_ROLES_POINTS;
        reasoning.push("Has open engineering roles (strong hiring intent)".to_string());
    }
    if features.engineering_role_count > HIRING_VOLUME_THRESHOLD {
        points += HIRING_VOLUME_POINTS;
        reasoning.push(format!(
            "High engineering hiring volume ({} roles)",
            features.engineering_role_count
        ));
    }

    // Size 0 means unknown and is neither large nor small.
    if features.company_size > LARGE_COMPANY_THRESHOLD {
        points += LARGE_COMPANY_POINTS;
        reasoning.push(format!(
            "Large company size ({}+ employees)",
            features.company_size
        ));
    } else if features.company_size > 0 && features.company_size < SMALL_COMPANY_THRESHOLD {
        points -= SMALL_COMPANY_PENALTY;
        reasoning.push(format!(
            "Small company size ({} employees)",
            features.company_size
        ));
    }

    if features.recent_funding {
        points += FUNDING_POINTS;
        reasoning.push("Recent funding indicates growth and budget".to_string());
    }
    if features.has_engineering_blog {
        points += BLOG_POINTS;
        reasoning.push("Has engineering blog (technical culture indicator)".to_string());
    }
    if features.tech_stack_alignment > ALIGNMENT_THRESHOLD {
        points += ALIGNMENT_POINTS;
        reasoning.push(format!(
            "High tech stack alignment ({:.0}%)",
            (features.tech_stack_alignment * 100.0).round()
        ));
    }

    #[allow(clippy::cast_possible_truncation)]
    let score = points.round().clamp(MIN_SCORE, MAX_SCORE) as i32;

    let data_points = [
        features.engineering_role_count > 0,
        features.total_open_roles > 0,
        features.company_size > 0,
        features.tech_stack_alignment > 0.0,
    ]
    .iter()
    .filter(|present| **present)
    .count();
    #[allow(clippy::cast_precision_loss)]
    let confidence = data_points as f64 / 4.0;

    if reasoning.is_empty() {
        reasoning.push("Limited data available".to_string());
    }

    IcpScoreResult {
        score,
        priority_level: PriorityLevel::from_score(score),
        confidence,
        reasoning,
        features,
    }
}

/// Alignment heuristic from the number of known technologies: `min(1, n / 10)`.
#[must_use]
pub fn tech_stack_alignment(tech_stack: &[String]) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let count = tech_stack.iter().filter(|t| !t.trim().is_empty()).count() as f64;
    (count / FULL_ALIGNMENT_TECH_COUNT).min(1.0)
}

/// Build scorer input from a stored account row.
#[must_use]
pub fn signal_from_record(record: &AccountSignalRecord) -> IcpSignal {
    IcpSignal {
        account_domain: record.account_domain.clone(),
        engineering_role_count: Some(record.engineering_role_count),
        has_open_engineering_roles: Some(record.has_open_engineering_roles),
        total_open_roles: Some(record.total_open_roles),
        has_engineering_blog: Some(record.has_engineering_blog),
        company_size: record.company_size,
        recent_funding: Some(record.recent_funding),
        tech_stack_alignment: Some(tech_stack_alignment(&record.tech_stack)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal() -> IcpSignal {
        IcpSignal {
            account_domain: "acme.dev".to_string(),
            ..IcpSignal::default()
        }
    }

    #[test]
    fn empty_signal_is_neutral_medium_with_zero_confidence() {
        let result = score(&IcpSignal::default());
        assert_eq!(result.score, 5);
        assert_eq!(result.priority_level, PriorityLevel::Medium);
        assert!(result.confidence.abs() < f64::EPSILON);
        assert_eq!(result.reasoning, vec!["Limited data available"]);
    }

    #[test]
    fn known_small_company_is_penalized() {
        let result = score(&IcpSignal {
            company_size: Some(12),
            ..signal()
        });
        assert_eq!(result.score, 4);
        assert_eq!(result.priority_level, PriorityLevel::Low);
        assert_eq!(result.reasoning, vec!["Small company size (12 employees)"]);
    }

    #[test]
    fn all_defaults_with_mid_size_company_scores_five() {
        let result = score(&IcpSignal {
            company_size: Some(120),
            ..signal()
        });
        assert_eq!(result.score, 5);
        assert_eq!(result.priority_level, PriorityLevel::Medium);
        assert_eq!(result.reasoning, vec!["Limited data available"]);
        assert!((result.confidence - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn strong_signal_clamps_at_ten() {
        let result = score(&IcpSignal {
            has_open_engineering_roles: Some(true),
            engineering_role_count: Some(10),
            company_size: Some(500),
            recent_funding: Some(true),
            ..signal()
        });
        assert_eq!(result.score, 10);
        assert_eq!(result.priority_level, PriorityLevel::High);
        assert_eq!(result.reasoning.len(), 4);
        assert_eq!(result.reasoning[1], "High engineering hiring volume (10 roles)");
        assert_eq!(result.reasoning[2], "Large company size (500+ employees)");
    }

    #[test]
    fn every_boost_still_clamps() {
        let result = score(&IcpSignal {
            engineering_role_count: Some(40),
            has_open_engineering_roles: Some(true),
            total_open_roles: Some(60),
            has_engineering_blog: Some(true),
            company_size: Some(5_000),
            recent_funding: Some(true),
            tech_stack_alignment: Some(0.9),
            ..signal()
        });
        assert_eq!(result.score, 10);
        assert!((result.confidence - 1.0).abs() < f64::EPSILON);
        assert!(result
            .reasoning
            .contains(&"High tech stack alignment (90%)".to_string()));
    }

    #[test]
    fn half_points_round_up() {
        // 5 - 1 (small) + 1.5 (funding) = 5.5 -> 6
        let result = score(&IcpSignal {
            company_size: Some(10),
            recent_funding: Some(true),
            ..signal()
        });
        assert_eq!(result.score, 6);
    }

    #[test]
    fn company_size_bounds_are_exclusive() {
        let at_200 = score(&IcpSignal {
            company_size: Some(200),
            ..signal()
        });
        let at_50 = score(&IcpSignal {
            company_size: Some(50),
            ..signal()
        });
        assert_eq!(at_200.score, 5);
        assert_eq!(at_50.score, 5);
    }

    #[test]
    fn scoring_is_deterministic_and_bounded() {
        let inputs = [
            IcpSignal::default(),
            IcpSignal {
                tech_stack_alignment: Some(f64::NAN),
                ..signal()
            },
            IcpSignal {
                tech_stack_alignment: Some(7.0),
                engineering_role_count: Some(u32::MAX),
                ..signal()
            },
        ];
        for input in &inputs {
            let a = score(input);
            assert_eq!(a, score(input));
            assert!((1..=10).contains(&a.score));
            assert!((0.0..=1.0).contains(&a.confidence));
        }
    }

    #[test]
    fn alignment_grows_with_stack_size() {
        let stack = |n: usize| (0..n).map(|i| format!("tech{i}")).collect::<Vec<_>>();
        assert!(tech_stack_alignment(&[]).abs() < f64::EPSILON);
        assert!((tech_stack_alignment(&stack(4)) - 0.4).abs() < 1e-9);
        assert!((tech_stack_alignment(&stack(25)) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn record_conversion_keeps_unknown_size() {
        let record = AccountSignalRecord {
            account_domain: "acme.dev".to_string(),
            has_open_engineering_roles: true,
            engineering_role_count: 3,
            tech_stack: vec!["rust".to_string(), "kafka".to_string()],
            ..AccountSignalRecord::default()
        };
        let signal = signal_from_record(&record);
        assert_eq!(signal.company_size, None);
        assert_eq!(signal.has_open_engineering_roles, Some(true));
        assert!((signal.tech_stack_alignment.unwrap() - 0.2).abs() < 1e-9);
    }
}
