//! Database operations for the `user_interactions` table.

use chrono::{DateTime, Utc};
use pitchcoach_core::{Interaction, InteractionType};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `user_interactions` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InteractionRow {
    pub id: i64,
    pub public_id: Uuid,
    pub user_id: String,
    pub account_domain: String,
    pub interaction_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<InteractionRow> for Interaction {
    fn from(row: InteractionRow) -> Self {
        Self {
            interaction_type: InteractionType::parse(&row.interaction_type),
            account_domain: row.account_domain,
            created_at: row.created_at,
        }
    }
}

/// All interactions for a user, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_user_interactions(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<InteractionRow>, DbError> {
    let rows = sqlx::query_as::<_, InteractionRow>(
        "SELECT id, public_id, user_id, account_domain, interaction_type, created_at \
         FROM user_interactions \
         WHERE user_id = $1 \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Append an interaction for a user. The domain is stored lowercase.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn record_interaction(
    pool: &PgPool,
    user_id: &str,
    account_domain: &str,
    interaction_type: &InteractionType,
) -> Result<InteractionRow, DbError> {
    let row = sqlx::query_as::<_, InteractionRow>(
        "INSERT INTO user_interactions (user_id, account_domain, interaction_type) \
         VALUES ($1, lower($2), $3) \
         RETURNING id, public_id, user_id, account_domain, interaction_type, created_at",
    )
    .bind(user_id)
    .bind(account_domain.trim())
    .bind(interaction_type.as_str())
    .fetch_one(pool)
    .await?;

    tracing::debug!(
        user_id,
        domain = %row.account_domain,
        kind = interaction_type.as_str(),
        "interaction recorded"
    );
    Ok(row)
}
