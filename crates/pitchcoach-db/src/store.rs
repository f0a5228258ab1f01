//! Postgres-backed [`AccountStore`].

use pitchcoach_core::{
    AccountSignalRecord, AccountStore, CandidateQuery, IcpScoreResult, Interaction,
    InteractionType,
};
use sqlx::PgPool;

use crate::{account_signals, interactions, DbError};

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl AccountStore for PgAccountStore {
    type Error = DbError;

    async fn get_account_signal(
        &self,
        account_domain: &str,
    ) -> Result<Option<AccountSignalRecord>, DbError> {
        let row = account_signals::get_account_signal(&self.pool, account_domain).await?;
        Ok(row.map(AccountSignalRecord::from))
    }

    async fn list_candidates(
        &self,
        query: CandidateQuery,
    ) -> Result<Vec<AccountSignalRecord>, DbError> {
        let rows = account_signals::list_candidate_accounts(
            &self.pool,
            query.min_icp_score,
            query.priority.level(),
            sql_limit(query.limit),
        )
        .await?;
        Ok(rows.into_iter().map(AccountSignalRecord::from).collect())
    }

    async fn list_intent_accounts(
        &self,
        min_icp_score: i32,
        limit: usize,
    ) -> Result<Vec<AccountSignalRecord>, DbError> {
        let rows =
            account_signals::list_intent_accounts(&self.pool, min_icp_score, sql_limit(limit))
                .await?;
        Ok(rows.into_iter().map(AccountSignalRecord::from).collect())
    }

    async fn list_interactions(&self, user_id: &str) -> Result<Vec<Interaction>, DbError> {
        let rows = interactions::list_user_interactions(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(Interaction::from).collect())
    }

    async fn save_icp_score(
        &self,
        account_domain: &str,
        result: &IcpScoreResult,
    ) -> Result<(), DbError> {
        account_signals::update_icp_score(&self.pool, account_domain, result).await
    }

    async fn record_interaction(
        &self,
        user_id: &str,
        account_domain: &str,
        interaction_type: &InteractionType,
    ) -> Result<(), DbError> {
        interactions::record_interaction(&self.pool, user_id, account_domain, interaction_type)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_saturate_instead_of_wrapping() {
        assert_eq!(sql_limit(30), 30);
        assert_eq!(sql_limit(usize::MAX), i64::MAX);
    }
}
