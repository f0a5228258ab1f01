//! Database operations for the `account_signals` table.

use chrono::{DateTime, Utc};
use pitchcoach_core::{AccountSignalRecord, IcpScoreResult, PriorityLevel};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::DbError;

const SELECT_COLUMNS: &str = "id, account_domain, company_name, icp_score, priority_level, \
     icp_confidence, icp_reasoning, icp_scored_at, has_open_engineering_roles, \
     engineering_role_count, total_open_roles, has_engineering_blog, company_size, \
     recent_funding, tech_stack, last_research_at, created_at, updated_at";

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `account_signals` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountSignalRow {
    pub id: i64,
    pub account_domain: String,
    pub company_name: String,
    pub icp_score: Option<i32>,
    pub priority_level: Option<String>,
    pub icp_confidence: Option<f64>,
    pub icp_reasoning: Json<Vec<String>>,
    pub icp_scored_at: Option<DateTime<Utc>>,
    pub has_open_engineering_roles: bool,
    pub engineering_role_count: i32,
    pub total_open_roles: i32,
    pub has_engineering_blog: bool,
    pub company_size: Option<i32>,
    pub recent_funding: bool,
    pub tech_stack: Vec<String>,
    pub last_research_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn non_negative(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

impl From<AccountSignalRow> for AccountSignalRecord {
    fn from(row: AccountSignalRow) -> Self {
        Self {
            priority_level: row
                .priority_level
                .as_deref()
                .and_then(|p| p.parse::<PriorityLevel>().ok()),
            account_domain: row.account_domain,
            company_name: row.company_name,
            icp_score: row.icp_score,
            has_open_engineering_roles: row.has_open_engineering_roles,
            engineering_role_count: non_negative(row.engineering_role_count),
            total_open_roles: non_negative(row.total_open_roles),
            has_engineering_blog: row.has_engineering_blog,
            company_size: row.company_size.and_then(|s| u32::try_from(s).ok()),
            recent_funding: row.recent_funding,
            tech_stack: row.tech_stack,
            last_research_at: row.last_research_at,
        }
    }
}

/// Signal values written by [`upsert_account_signal`]. Score columns are left
/// untouched; they are owned by [`update_icp_score`].
#[derive(Debug, Clone, Default)]
pub struct NewAccountSignal {
    pub account_domain: String,
    pub company_name: String,
    pub has_open_engineering_roles: bool,
    pub engineering_role_count: u32,
    pub total_open_roles: u32,
    pub has_engineering_blog: bool,
    pub company_size: Option<u32>,
    pub recent_funding: bool,
    pub tech_stack: Vec<String>,
    pub last_research_at: Option<DateTime<Utc>>,
}

fn to_db_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns the signal row for a domain (matched lowercase), or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_account_signal(
    pool: &PgPool,
    account_domain: &str,
) -> Result<Option<AccountSignalRow>, DbError> {
    let row = sqlx::query_as::<_, AccountSignalRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM account_signals WHERE account_domain = lower($1)"
    ))
    .bind(account_domain.trim())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Scored accounts with `icp_score >= min_icp_score`, optionally restricted to
/// one priority level, highest score first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_candidate_accounts(
    pool: &PgPool,
    min_icp_score: i32,
    priority_level: Option<PriorityLevel>,
    limit: i64,
) -> Result<Vec<AccountSignalRow>, DbError> {
    let rows = sqlx::query_as::<_, AccountSignalRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM account_signals \
         WHERE icp_score >= $1 \
           AND ($2::text IS NULL OR priority_level = $2) \
         ORDER BY icp_score DESC, account_domain \
         LIMIT $3"
    ))
    .bind(min_icp_score)
    .bind(priority_level.map(PriorityLevel::as_str))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Hiring accounts with `icp_score >= min_icp_score`, ordered by score then
/// engineering role count.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_intent_accounts(
    pool: &PgPool,
    min_icp_score: i32,
    limit: i64,
) -> Result<Vec<AccountSignalRow>, DbError> {
    let rows = sqlx::query_as::<_, AccountSignalRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM account_signals \
         WHERE has_open_engineering_roles AND icp_score >= $1 \
         ORDER BY icp_score DESC, engineering_role_count DESC, account_domain \
         LIMIT $2"
    ))
    .bind(min_icp_score)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert or update the signal columns for an account.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn upsert_account_signal(
    pool: &PgPool,
    signal: &NewAccountSignal,
) -> Result<AccountSignalRow, DbError> {
    let row = sqlx::query_as::<_, AccountSignalRow>(&format!(
        "INSERT INTO account_signals \
             (account_domain, company_name, has_open_engineering_roles, engineering_role_count, \
              total_open_roles, has_engineering_blog, company_size, recent_funding, tech_stack, \
              last_research_at) \
         VALUES (lower($1), $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         ON CONFLICT (account_domain) DO UPDATE SET \
             company_name = EXCLUDED.company_name, \
             has_open_engineering_roles = EXCLUDED.has_open_engineering_roles, \
             engineering_role_count = EXCLUDED.engineering_role_count, \
             total_open_roles = EXCLUDED.total_open_roles, \
             has_engineering_blog = EXCLUDED.has_engineering_blog, \
             company_size = EXCLUDED.company_size, \
             recent_funding = EXCLUDED.recent_funding, \
             tech_stack = EXCLUDED.tech_stack, \
             last_research_at = COALESCE(EXCLUDED.last_research_at, account_signals.last_research_at), \
             updated_at = NOW() \
         RETURNING {SELECT_COLUMNS}"
    ))
    .bind(signal.account_domain.trim())
    .bind(&signal.company_name)
    .bind(signal.has_open_engineering_roles)
    .bind(to_db_int(signal.engineering_role_count))
    .bind(to_db_int(signal.total_open_roles))
    .bind(signal.has_engineering_blog)
    .bind(signal.company_size.map(to_db_int))
    .bind(signal.recent_funding)
    .bind(&signal.tech_stack)
    .bind(signal.last_research_at)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Store a computed ICP score on an existing account row.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists for the domain, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn update_icp_score(
    pool: &PgPool,
    account_domain: &str,
    result: &IcpScoreResult,
) -> Result<(), DbError> {
    let outcome = sqlx::query(
        "UPDATE account_signals \
         SET icp_score = $2, priority_level = $3, icp_confidence = $4, icp_reasoning = $5, \
             icp_scored_at = NOW(), updated_at = NOW() \
         WHERE account_domain = lower($1)",
    )
    .bind(account_domain.trim())
    .bind(result.score)
    .bind(result.priority_level.as_str())
    .bind(result.confidence)
    .bind(Json(&result.reasoning))
    .execute(pool)
    .await?;

    if outcome.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
