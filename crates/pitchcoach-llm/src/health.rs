//! Provider health reporting with a TTL cache.
//!
//! Health is judged from credential presence and format only; no request is
//! made to the provider. Results are cached per provider as explicit
//! [`CachedEntry`] records so repeated status checks stay cheap.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use pitchcoach_core::Clock;
use serde::Serialize;

use crate::config::{LlmConfig, ProviderKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderHealth {
    pub name: String,
    pub available: bool,
    pub last_checked: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A cached value together with when it was fetched and how long it stays fresh.
#[derive(Debug, Clone)]
pub struct CachedEntry<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
    pub ttl: chrono::Duration,
}

impl<T> CachedEntry<T> {
    #[must_use]
    pub fn new(value: T, fetched_at: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        Self {
            value,
            fetched_at,
            ttl,
        }
    }

    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.fetched_at < self.ttl
    }
}

/// Check the format of a provider API key.
///
/// # Errors
///
/// Returns a human-readable reason when the key is empty or has the wrong prefix.
pub fn validate_api_key(kind: ProviderKind, key: &str) -> Result<(), String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err("API key is empty".to_string());
    }

    let (prefix, label) = match kind {
        ProviderKind::Claude => ("sk-ant-", "Anthropic key must start with sk-ant-"),
        ProviderKind::OpenAi => ("sk-", "OpenAI key must start with sk-"),
        ProviderKind::Gemini => ("AIza", "Gemini key format invalid. Should start with AIza"),
    };

    if trimmed.starts_with(prefix) {
        Ok(())
    } else {
        Err(label.to_string())
    }
}

fn check_provider(kind: ProviderKind, config: &LlmConfig, now: DateTime<Utc>) -> ProviderHealth {
    let result = match config.api_key(kind) {
        None => Err(format!("{} not configured", kind.key_env_var())),
        Some(key) => validate_api_key(kind, key),
    };

    ProviderHealth {
        name: kind.to_string(),
        available: result.is_ok(),
        last_checked: now,
        error: result.err(),
    }
}

/// Per-provider health cache.
pub struct HealthCache<C: Clock> {
    clock: C,
    ttl: chrono::Duration,
    entries: Mutex<HashMap<ProviderKind, CachedEntry<ProviderHealth>>>,
}

impl<C: Clock> HealthCache<C> {
    #[must_use]
    pub fn new(clock: C, ttl: std::time::Duration) -> Self {
        Self {
            clock,
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::seconds(60)),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Health for one provider; served from cache while the entry is fresh.
    pub fn check(&self, kind: ProviderKind, config: &LlmConfig, force_refresh: bool) -> ProviderHealth {
        let now = self.clock.now();
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if !force_refresh {
            if let Some(entry) = entries.get(&kind) {
                if entry.is_fresh(now) {
                    return entry.value.clone();
                }
            }
        }

        let health = check_provider(kind, config, now);
        tracing::debug!(provider = %kind, available = health.available, "provider health refreshed");
        entries.insert(kind, CachedEntry::new(health.clone(), now, self.ttl));
        health
    }

    /// Health for every supported provider.
    pub fn check_all(&self, config: &LlmConfig) -> Vec<ProviderHealth> {
        ProviderKind::ALL
            .iter()
            .map(|&kind| self.check(kind, config, false))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::time::Duration;

    use chrono::TimeZone;

    use super::*;
    use crate::config::ProviderEndpoints;

    /// Clock whose time can be moved forward from the test.
    struct SteppingClock(AtomicI64);

    impl Clock for &SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.timestamp_opt(self.0.load(Ordering::SeqCst), 0)
                .single()
                .expect("valid timestamp")
        }
    }

    fn config() -> LlmConfig {
        LlmConfig {
            provider: ProviderKind::Claude,
            anthropic_api_key: Some("sk-ant-abc".to_string()),
            openai_api_key: Some("not-a-key".to_string()),
            gemini_api_key: None,
            anthropic_model: "m".to_string(),
            openai_model: "m".to_string(),
            gemini_model: "m".to_string(),
            timeout: Duration::from_secs(1),
            max_tokens: 1,
            endpoints: ProviderEndpoints::default(),
        }
    }

    #[test]
    fn key_format_rules() {
        assert!(validate_api_key(ProviderKind::Claude, "sk-ant-123").is_ok());
        assert!(validate_api_key(ProviderKind::Claude, "sk-123").is_err());
        assert!(validate_api_key(ProviderKind::OpenAi, " sk-123 ").is_ok());
        assert!(validate_api_key(ProviderKind::Gemini, "AIza999").is_ok());
        assert_eq!(
            validate_api_key(ProviderKind::Gemini, "   ").unwrap_err(),
            "API key is empty"
        );
    }

    #[test]
    fn reports_each_provider() {
        let clock = SteppingClock(AtomicI64::new(1_700_000_000));
        let cache = HealthCache::new(&clock, Duration::from_secs(60));
        let all = cache.check_all(&config());
        assert_eq!(all.len(), 3);

        let claude = all.iter().find(|h| h.name == "claude").unwrap();
        assert!(claude.available);
        assert!(claude.error.is_none());

        let openai = all.iter().find(|h| h.name == "openai").unwrap();
        assert!(!openai.available);
        assert_eq!(openai.error.as_deref(), Some("OpenAI key must start with sk-"));

        let gemini = all.iter().find(|h| h.name == "gemini").unwrap();
        assert!(!gemini.available);
        assert!(gemini.error.as_deref().unwrap().contains("GOOGLE_GEMINI_API_KEY"));
    }

    #[test]
    fn fresh_entry_is_served_from_cache() {
        let clock = SteppingClock(AtomicI64::new(1_700_000_000));
        let cache = HealthCache::new(&clock, Duration::from_secs(60));
        let mut cfg = config();

        let first = cache.check(ProviderKind::Claude, &cfg, false);
        assert!(first.available);

        // Credential removed, but the cached result is still fresh.
        cfg.anthropic_api_key = None;
        clock.0.fetch_add(30, Ordering::SeqCst);
        let cached = cache.check(ProviderKind::Claude, &cfg, false);
        assert_eq!(cached, first);

        // Forced refresh sees the change immediately.
        let forced = cache.check(ProviderKind::Claude, &cfg, true);
        assert!(!forced.available);
    }

    #[test]
    fn stale_entry_is_recomputed() {
        let clock = SteppingClock(AtomicI64::new(1_700_000_000));
        let cache = HealthCache::new(&clock, Duration::from_secs(60));
        let mut cfg = config();

        assert!(cache.check(ProviderKind::Claude, &cfg, false).available);
        cfg.anthropic_api_key = None;
        clock.0.fetch_add(60, Ordering::SeqCst);
        let refreshed = cache.check(ProviderKind::Claude, &cfg, false);
        assert!(!refreshed.available);
        assert_eq!(refreshed.last_checked.timestamp(), 1_700_000_060);
    }
}
