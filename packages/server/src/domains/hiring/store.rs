// Storage interface for the hire transition
//
// These are INFRASTRUCTURE traits only - no business logic. The contract that
// matters is conditional_update_status: a single-document compare-and-set
// returning how many rows matched. The hire coordinator's correctness rests
// entirely on that primitive, so it is explicit here rather than buried in
// SQL strings.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domains::bids::{Bid, BidStatus, BidView};
use crate::domains::gigs::{Gig, GigStatus};

#[async_trait]
pub trait GigStore: Send + Sync {
    async fn find_by_id(&self, gig_id: Uuid) -> Result<Option<Gig>>;

    /// Set the gig status to `new` only if it currently equals `expected`.
    /// Returns the matched-row count (0 or 1).
    async fn conditional_update_status(
        &self,
        gig_id: Uuid,
        expected: GigStatus,
        new: GigStatus,
    ) -> Result<u64>;
}

#[async_trait]
pub trait BidStore: Send + Sync {
    async fn find_by_id(&self, bid_id: Uuid) -> Result<Option<Bid>>;

    /// Set the bid status to `new` only if it currently equals `expected`.
    /// Returns the matched-row count (0 or 1).
    async fn conditional_update_status(
        &self,
        bid_id: Uuid,
        expected: BidStatus,
        new: BidStatus,
    ) -> Result<u64>;

    /// Reject all still-pending bids on the gig except the winner. Idempotent.
    async fn reject_other_pending(&self, gig_id: Uuid, winning_bid_id: Uuid) -> Result<u64>;

    /// Materialized read: bid joined with freelancer and gig display fields.
    async fn find_view(&self, bid_id: Uuid) -> Result<Option<BidView>>;
}

/// Postgres-backed gig store
pub struct PgGigStore {
    pool: PgPool,
}

impl PgGigStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GigStore for PgGigStore {
    async fn find_by_id(&self, gig_id: Uuid) -> Result<Option<Gig>> {
        Gig::find_by_id(gig_id, &self.pool).await
    }

    async fn conditional_update_status(
        &self,
        gig_id: Uuid,
        expected: GigStatus,
        new: GigStatus,
    ) -> Result<u64> {
        Gig::update_status_if(gig_id, expected, new, &self.pool).await
    }
}

/// Postgres-backed bid store
pub struct PgBidStore {
    pool: PgPool,
}

impl PgBidStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BidStore for PgBidStore {
    async fn find_by_id(&self, bid_id: Uuid) -> Result<Option<Bid>> {
        Bid::find_by_id(bid_id, &self.pool).await
    }

    async fn conditional_update_status(
        &self,
        bid_id: Uuid,
        expected: BidStatus,
        new: BidStatus,
    ) -> Result<u64> {
        Bid::update_status_if(bid_id, expected, new, &self.pool).await
    }

    async fn reject_other_pending(&self, gig_id: Uuid, winning_bid_id: Uuid) -> Result<u64> {
        Bid::reject_other_pending(gig_id, winning_bid_id, &self.pool).await
    }

    async fn find_view(&self, bid_id: Uuid) -> Result<Option<BidView>> {
        Bid::find_view(bid_id, &self.pool).await
    }
}
