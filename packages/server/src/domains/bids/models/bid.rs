use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Bid model - SQL persistence layer
///
/// A bid belongs to exactly one gig and one freelancer; the
/// `(gig_id, freelancer_id)` pair is unique at the schema level. `pending` is
/// the initial status and is never re-entered once left.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Bid {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub freelancer_id: Uuid,
    pub message: String,
    pub price: i64,
    pub status: String, // 'pending', 'hired', 'rejected'
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Bid status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    Pending,
    Hired,
    Rejected,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BidStatus::Pending => "pending",
            BidStatus::Hired => "hired",
            BidStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for BidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BidStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(BidStatus::Pending),
            "hired" => Ok(BidStatus::Hired),
            "rejected" => Ok(BidStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid bid status: {}", s)),
        }
    }
}

/// Bid joined with the freelancer and gig display fields.
///
/// The materialized view returned by the hire endpoint and carried into the
/// hire event.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct BidView {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub freelancer_id: Uuid,
    pub message: String,
    pub price: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub freelancer_name: String,
    pub freelancer_email: String,
    pub gig_title: String,
    pub gig_status: String,
}

impl Bid {
    /// Find bid by ID
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM bids WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// All bids for a gig, newest first
    pub async fn find_for_gig(gig_id: Uuid, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM bids WHERE gig_id = $1 ORDER BY created_at DESC",
        )
        .bind(gig_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert a new bid (status starts as 'pending')
    ///
    /// Fails on the unique `(gig_id, freelancer_id)` constraint if the
    /// freelancer already bid on this gig.
    pub async fn create(
        gig_id: Uuid,
        freelancer_id: Uuid,
        message: &str,
        price: i64,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO bids (gig_id, freelancer_id, message, price)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(gig_id)
        .bind(freelancer_id)
        .bind(message)
        .bind(price)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Conditionally transition the bid status: compare-and-set on a single row.
    ///
    /// Returns the number of rows matched (0 or 1).
    pub async fn update_status_if(
        id: Uuid,
        expected: BidStatus,
        new: BidStatus,
        pool: &PgPool,
    ) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE bids SET status = $3, updated_at = now() WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(expected.as_str())
        .bind(new.as_str())
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Reject every other still-pending bid on a gig.
    ///
    /// Conditional per row (`status = 'pending'`), so already-decided bids are
    /// untouched and running it twice has no additional effect. Returns how
    /// many bids were rejected.
    pub async fn reject_other_pending(
        gig_id: Uuid,
        winning_bid_id: Uuid,
        pool: &PgPool,
    ) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE bids SET status = 'rejected', updated_at = now()
             WHERE gig_id = $1 AND id <> $2 AND status = 'pending'",
        )
        .bind(gig_id)
        .bind(winning_bid_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Bid with freelancer and gig display fields resolved
    pub async fn find_view(id: Uuid, pool: &PgPool) -> Result<Option<BidView>> {
        sqlx::query_as::<_, BidView>(
            "SELECT b.id, b.gig_id, b.freelancer_id, b.message, b.price, b.status,
                    b.created_at,
                    u.name AS freelancer_name, u.email AS freelancer_email,
                    g.title AS gig_title, g.status AS gig_status
             FROM bids b
             JOIN gigs g ON g.id = b.gig_id
             JOIN users u ON u.id = b.freelancer_id
             WHERE b.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}
