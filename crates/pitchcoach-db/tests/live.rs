//! Live integration tests for pitchcoach-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. They need `DATABASE_URL` and are ignored by default:
//! run with `cargo test -p pitchcoach-db -- --ignored`.

use pitchcoach_core::{
    AccountStore, CandidateQuery, IcpFeatures, IcpScoreResult, InteractionType, PriorityFilter,
    PriorityLevel,
};
use pitchcoach_db::{
    get_account_signal, list_candidate_accounts, list_intent_accounts, list_user_interactions,
    record_interaction, update_icp_score, upsert_account_signal, DbError, NewAccountSignal,
    PgAccountStore,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_signal(domain: &str) -> NewAccountSignal {
    NewAccountSignal {
        account_domain: domain.to_string(),
        company_name: format!("Company {domain}"),
        has_open_engineering_roles: true,
        engineering_role_count: 4,
        total_open_roles: 9,
        company_size: Some(250),
        tech_stack: vec!["puppeteer".to_string()],
        ..NewAccountSignal::default()
    }
}

fn score_result(score: i32) -> IcpScoreResult {
    IcpScoreResult {
        score,
        priority_level: PriorityLevel::from_score(score),
        confidence: 0.75,
        reasoning: vec!["Active engineering hiring (4 roles)".to_string()],
        features: IcpFeatures::default(),
    }
}

async fn seed_scored(pool: &sqlx::PgPool, domain: &str, score: i32) {
    upsert_account_signal(pool, &new_signal(domain))
        .await
        .unwrap_or_else(|e| panic!("upsert failed for {domain}: {e}"));
    update_icp_score(pool, domain, &score_result(score))
        .await
        .unwrap_or_else(|e| panic!("score update failed for {domain}: {e}"));
}

// ---------------------------------------------------------------------------
// Account signals
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn upsert_lowercases_domain_and_updates_in_place(pool: sqlx::PgPool) {
    let first = upsert_account_signal(&pool, &new_signal("Acme.IO"))
        .await
        .expect("first upsert failed");
    assert_eq!(first.account_domain, "acme.io");

    let second = upsert_account_signal(
        &pool,
        &NewAccountSignal {
            engineering_role_count: 11,
            ..new_signal("acme.io")
        },
    )
    .await
    .expect("second upsert failed");

    assert_eq!(first.id, second.id);
    assert_eq!(second.engineering_role_count, 11);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn score_update_round_trips_reasoning(pool: sqlx::PgPool) {
    seed_scored(&pool, "acme.io", 8).await;

    let row = get_account_signal(&pool, "ACME.io")
        .await
        .expect("get failed")
        .expect("row missing");
    assert_eq!(row.icp_score, Some(8));
    assert_eq!(row.priority_level.as_deref(), Some("high"));
    assert_eq!(row.icp_reasoning.0.len(), 1);
    assert!(row.icp_scored_at.is_some());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn score_update_for_unknown_domain_is_not_found(pool: sqlx::PgPool) {
    let result = update_icp_score(&pool, "ghost.io", &score_result(5)).await;
    assert!(matches!(result, Err(DbError::NotFound)), "got {result:?}");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn candidates_respect_min_score_priority_and_limit(pool: sqlx::PgPool) {
    seed_scored(&pool, "high.io", 9).await;
    seed_scored(&pool, "mid.io", 6).await;
    seed_scored(&pool, "low.io", 3).await;

    let rows = list_candidate_accounts(&pool, 5, None, 10)
        .await
        .expect("list failed");
    let domains: Vec<_> = rows.iter().map(|r| r.account_domain.as_str()).collect();
    assert_eq!(domains, vec!["high.io", "mid.io"]);

    let high_only = list_candidate_accounts(&pool, 1, Some(PriorityLevel::High), 10)
        .await
        .expect("filtered list failed");
    assert_eq!(high_only.len(), 1);
    assert_eq!(high_only[0].account_domain, "high.io");

    let limited = list_candidate_accounts(&pool, 1, None, 1)
        .await
        .expect("limited list failed");
    assert_eq!(limited.len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn intent_accounts_require_open_roles(pool: sqlx::PgPool) {
    seed_scored(&pool, "hiring.io", 8).await;
    upsert_account_signal(
        &pool,
        &NewAccountSignal {
            has_open_engineering_roles: false,
            ..new_signal("quiet.io")
        },
    )
    .await
    .expect("upsert failed");
    update_icp_score(&pool, "quiet.io", &score_result(9))
        .await
        .expect("score update failed");

    let rows = list_intent_accounts(&pool, 7, 10).await.expect("list failed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].account_domain, "hiring.io");
}

// ---------------------------------------------------------------------------
// Interactions and the store seam
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn interactions_are_listed_newest_first(pool: sqlx::PgPool) {
    record_interaction(&pool, "user-1", "Acme.io", &InteractionType::Viewed)
        .await
        .expect("first insert failed");
    record_interaction(&pool, "user-1", "acme.io", &InteractionType::Contacted)
        .await
        .expect("second insert failed");
    record_interaction(&pool, "user-2", "other.io", &InteractionType::DealWon)
        .await
        .expect("other user insert failed");

    let rows = list_user_interactions(&pool, "user-1")
        .await
        .expect("list failed");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].interaction_type, "contacted");
    assert!(rows.iter().all(|r| r.account_domain == "acme.io"));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn pg_store_serves_the_account_store_seam(pool: sqlx::PgPool) {
    seed_scored(&pool, "acme.io", 8).await;
    record_interaction(&pool, "user-1", "acme.io", &InteractionType::MeetingBooked)
        .await
        .expect("insert failed");

    let store = PgAccountStore::new(pool);

    let record = store
        .get_account_signal("acme.io")
        .await
        .expect("get failed")
        .expect("record missing");
    assert_eq!(record.priority_level, Some(PriorityLevel::High));

    let candidates = store
        .list_candidates(CandidateQuery {
            min_icp_score: 6,
            priority: PriorityFilter::All,
            limit: 5,
        })
        .await
        .expect("candidates failed");
    assert_eq!(candidates.len(), 1);

    let interactions = store
        .list_interactions("user-1")
        .await
        .expect("interactions failed");
    assert_eq!(
        interactions[0].interaction_type,
        InteractionType::MeetingBooked
    );

    store
        .record_interaction("user-2", "ACME.io", &InteractionType::Viewed)
        .await
        .expect("record failed");
    let recorded = store
        .list_interactions("user-2")
        .await
        .expect("interactions failed");
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].account_domain, "acme.io");

    store
        .save_icp_score("acme.io", &score_result(4))
        .await
        .expect("save failed");
    let rescored = store
        .get_account_signal("acme.io")
        .await
        .expect("get failed")
        .expect("record missing");
    assert_eq!(rescored.icp_score, Some(4));
    assert_eq!(rescored.priority_level, Some(PriorityLevel::Low));
}
