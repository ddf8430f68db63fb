use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Gig model - SQL persistence layer
///
/// `status` is the optimistic-lock column for the hire transition: once a gig
/// is `assigned` it never returns to `open`, and the only way to move it is
/// the conditional update below.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Gig {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub budget: i64,
    pub status: String, // 'open', 'assigned'
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Gig status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GigStatus {
    Open,
    Assigned,
}

impl GigStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GigStatus::Open => "open",
            GigStatus::Assigned => "assigned",
        }
    }
}

impl std::fmt::Display for GigStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GigStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "open" => Ok(GigStatus::Open),
            "assigned" => Ok(GigStatus::Assigned),
            _ => Err(anyhow::anyhow!("Invalid gig status: {}", s)),
        }
    }
}

impl Gig {
    /// Find gig by ID
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM gigs WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a new gig (status starts as 'open')
    pub async fn create(
        owner_id: Uuid,
        title: &str,
        description: &str,
        budget: i64,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO gigs (owner_id, title, description, budget)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(budget)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Conditionally transition the gig status: compare-and-set on a single row.
    ///
    /// Applies only if the stored status still equals `expected` at the time of
    /// the write. Returns the number of rows matched (0 or 1); 0 means another
    /// writer got there first. This is the mutual-exclusion point the hire
    /// transition serializes on - do not replace with read-then-write.
    pub async fn update_status_if(
        id: Uuid,
        expected: GigStatus,
        new: GigStatus,
        pool: &PgPool,
    ) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE gigs SET status = $3, updated_at = now() WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(expected.as_str())
        .bind(new.as_str())
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
