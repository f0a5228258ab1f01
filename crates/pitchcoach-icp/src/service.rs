//! Scoring of stored accounts: load signals, score, persist.

use std::collections::BTreeMap;

use futures::future::join_all;
use pitchcoach_core::{execute_with_retry, AccountStore, IcpScoreResult};

use crate::scorer::{score, signal_from_record};

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_INITIAL_DELAY_MS: u64 = 1_000;

pub struct IcpService<S> {
    store: S,
    max_attempts: u32,
    initial_delay_ms: u64,
}

impl<S: AccountStore> IcpService<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
        }
    }

    /// Retry policy applied to every store call.
    #[must_use]
    pub fn with_retry(mut self, max_attempts: u32, initial_delay_ms: u64) -> Self {
        self.max_attempts = max_attempts;
        self.initial_delay_ms = initial_delay_ms;
        self
    }

    /// Score one stored account and persist the result.
    ///
    /// Returns `Ok(None)` when the store has no signals for the domain.
    ///
    /// # Errors
    ///
    /// Returns the store error once retries are exhausted.
    pub async fn score_domain(&self, domain: &str) -> Result<Option<IcpScoreResult>, S::Error> {
        let domain = domain.trim().to_lowercase();

        let record = execute_with_retry(self.max_attempts, self.initial_delay_ms, || {
            self.store.get_account_signal(&domain)
        })
        .await?;

        let Some(record) = record else {
            tracing::debug!(domain = %domain, "no stored signals; skipping");
            return Ok(None);
        };

        let result = score(&signal_from_record(&record));

        execute_with_retry(self.max_attempts, self.initial_delay_ms, || {
            self.store.save_icp_score(&domain, &result)
        })
        .await?;

        tracing::info!(
            domain = %domain,
            score = result.score,
            priority = %result.priority_level,
            "ICP score updated"
        );
        Ok(Some(result))
    }

    /// Score many stored accounts concurrently.
    ///
    /// Unknown domains are omitted. Failures are logged and omitted so one bad
    /// account does not block the batch.
    pub async fn score_domains(&self, domains: &[String]) -> BTreeMap<String, IcpScoreResult> {
        let outcomes = join_all(domains.iter().map(|domain| async move {
            (domain.trim().to_lowercase(), self.score_domain(domain).await)
        }))
        .await;

        let mut scored = BTreeMap::new();
        for (domain, outcome) in outcomes {
            match outcome {
                Ok(Some(result)) => {
                    scored.insert(domain, result);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(domain = %domain, error = %e, "ICP scoring failed"),
            }
        }
        scored
    }
}
