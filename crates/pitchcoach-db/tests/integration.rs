//! Offline tests for pitchcoach-db pool configuration and row conversions.
//! These tests do not require a live database connection.

use chrono::Utc;
use pitchcoach_core::{
    AccountSignalRecord, AppConfig, Environment, Interaction, InteractionType, PriorityLevel,
};
use pitchcoach_db::{AccountSignalRow, InteractionRow, PoolConfig};
use sqlx::types::Json;
use std::path::PathBuf;
use uuid::Uuid;

fn app_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        scenarios_path: PathBuf::from("./config/scenarios.yaml"),
        database_url: Some("postgres://example".to_string()),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        llm_provider: "claude".to_string(),
        anthropic_api_key: None,
        openai_api_key: None,
        gemini_api_key: None,
        anthropic_model: "claude-test".to_string(),
        openai_model: "gpt-test".to_string(),
        gemini_model: "gemini-test".to_string(),
        llm_timeout_secs: 8,
        llm_max_tokens: 2000,
        retry_max_attempts: 3,
        retry_initial_delay_ms: 1000,
        provider_health_ttl_secs: 60,
    }
}

fn signal_row() -> AccountSignalRow {
    AccountSignalRow {
        id: 1,
        account_domain: "acme.io".to_string(),
        company_name: "Acme".to_string(),
        icp_score: Some(8),
        priority_level: Some("high".to_string()),
        icp_confidence: Some(0.75),
        icp_reasoning: Json(vec!["Active engineering hiring (5 roles)".to_string()]),
        icp_scored_at: Some(Utc::now()),
        has_open_engineering_roles: true,
        engineering_role_count: 5,
        total_open_roles: 12,
        has_engineering_blog: true,
        company_size: Some(400),
        recent_funding: false,
        tech_stack: vec!["playwright".to_string()],
        last_research_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config());
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn signal_row_converts_to_record() {
    let record = AccountSignalRecord::from(signal_row());

    assert_eq!(record.account_domain, "acme.io");
    assert_eq!(record.icp_score, Some(8));
    assert_eq!(record.priority_level, Some(PriorityLevel::High));
    assert_eq!(record.engineering_role_count, 5);
    assert_eq!(record.total_open_roles, 12);
    assert_eq!(record.company_size, Some(400));
    assert_eq!(record.tech_stack, vec!["playwright".to_string()]);
}

#[test]
fn unrecognized_priority_and_negative_counts_are_dropped() {
    let row = AccountSignalRow {
        priority_level: Some("urgent".to_string()),
        engineering_role_count: -3,
        company_size: Some(-1),
        ..signal_row()
    };

    let record = AccountSignalRecord::from(row);
    assert_eq!(record.priority_level, None);
    assert_eq!(record.engineering_role_count, 0);
    assert_eq!(record.company_size, None);
}

#[test]
fn interaction_row_converts_known_and_unknown_types() {
    let row = InteractionRow {
        id: 9,
        public_id: Uuid::new_v4(),
        user_id: "user-1".to_string(),
        account_domain: "acme.io".to_string(),
        interaction_type: "meeting_booked".to_string(),
        created_at: Utc::now(),
    };
    let known = Interaction::from(row.clone());
    assert_eq!(known.interaction_type, InteractionType::MeetingBooked);
    assert_eq!(known.account_domain, "acme.io");

    let unknown = Interaction::from(InteractionRow {
        interaction_type: "webinar".to_string(),
        ..row
    });
    assert_eq!(
        unknown.interaction_type,
        InteractionType::Other("webinar".to_string())
    );
}
