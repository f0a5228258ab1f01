//! Ideal Customer Profile scoring and account recommendation ranking.
//!
//! [`score_icp`] is a pure point-based scorer. [`IcpService`] applies it to
//! accounts held in an [`pitchcoach_core::AccountStore`], and
//! [`RecommendationRanker`] orders stored accounts for a user by ICP score,
//! that user's engagement and research recency.

pub mod engagement;
pub mod ranker;
pub mod scorer;
pub mod service;

pub use engagement::{engagement_score, is_recent_research, RECENT_RESEARCH_DAYS};
pub use ranker::{RecommendationRanker, INTENT_MIN_ICP_SCORE};
pub use scorer::{score as score_icp, signal_from_record, tech_stack_alignment};
pub use service::IcpService;
