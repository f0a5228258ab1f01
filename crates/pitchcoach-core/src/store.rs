//! Persistence seam for ICP scores and user interaction history.

use std::future::Future;

use crate::accounts::{AccountSignalRecord, Interaction, InteractionType};
use crate::icp::{IcpScoreResult, PriorityFilter};

/// Candidate listing request for recommendation ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateQuery {
    /// Inclusive lower bound on the stored ICP score.
    pub min_icp_score: i32,
    pub priority: PriorityFilter,
    /// Maximum rows to return, ordered by ICP score descending.
    pub limit: usize,
}

/// CRUD capability the ICP service and recommendation ranker read and write
/// through. Implemented by `pitchcoach-db` for Postgres.
pub trait AccountStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the signal row for one account (domain is matched case-insensitively).
    fn get_account_signal(
        &self,
        account_domain: &str,
    ) -> impl Future<Output = Result<Option<AccountSignalRecord>, Self::Error>> + Send;

    /// List scored accounts matching `query`, highest ICP score first.
    fn list_candidates(
        &self,
        query: CandidateQuery,
    ) -> impl Future<Output = Result<Vec<AccountSignalRecord>, Self::Error>> + Send;

    /// List accounts with open engineering roles and an ICP score of at least
    /// `min_icp_score`, ordered by score then engineering role count.
    fn list_intent_accounts(
        &self,
        min_icp_score: i32,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<AccountSignalRecord>, Self::Error>> + Send;

    /// All interactions for a user, newest first.
    fn list_interactions(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<Interaction>, Self::Error>> + Send;

    /// Persist a freshly computed ICP score for an account.
    fn save_icp_score(
        &self,
        account_domain: &str,
        result: &IcpScoreResult,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Append an interaction for a user, timestamped by the store.
    fn record_interaction(
        &self,
        user_id: &str,
        account_domain: &str,
        interaction_type: &InteractionType,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

impl<T: AccountStore> AccountStore for &T {
    type Error = T::Error;

    fn get_account_signal(
        &self,
        account_domain: &str,
    ) -> impl Future<Output = Result<Option<AccountSignalRecord>, Self::Error>> + Send {
        (**self).get_account_signal(account_domain)
    }

    fn list_candidates(
        &self,
        query: CandidateQuery,
    ) -> impl Future<Output = Result<Vec<AccountSignalRecord>, Self::Error>> + Send {
        (**self).list_candidates(query)
    }

    fn list_intent_accounts(
        &self,
        min_icp_score: i32,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<AccountSignalRecord>, Self::Error>> + Send {
        (**self).list_intent_accounts(min_icp_score, limit)
    }

    fn list_interactions(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<Interaction>, Self::Error>> + Send {
        (**self).list_interactions(user_id)
    }

    fn save_icp_score(
        &self,
        account_domain: &str,
        result: &IcpScoreResult,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        (**self).save_icp_score(account_domain, result)
    }

    fn record_interaction(
        &self,
        user_id: &str,
        account_domain: &str,
        interaction_type: &InteractionType,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        (**self).record_interaction(user_id, account_domain, interaction_type)
    }
}
