//! Race-safe hire transition.
//!
//! Concurrent hire requests for the same gig must produce exactly one winner.
//! The underlying store only guarantees atomicity of single-document updates,
//! so the transition serializes on one conditional write: the gig's
//! `open -> assigned` compare-and-set. Everything validated before that write
//! is stale by the time it executes and is treated as a precondition check
//! only, never as the decision.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::domains::bids::{BidStatus, BidView};
use crate::domains::gigs::GigStatus;
use crate::domains::hiring::events::{HireEvent, HireEvents};
use crate::domains::hiring::store::{BidStore, GigStore};

#[derive(Debug, Error)]
pub enum HireError {
    #[error("Bid not found")]
    BidNotFound,

    /// A bid must never outlive its gig; hitting this is a data-integrity
    /// problem upstream, but it maps to a plain 404 for the caller.
    #[error("Gig not found")]
    GigNotFound,

    #[error("Not authorized to hire for this gig")]
    NotGigOwner,

    #[error("This bid is already {0}")]
    BidAlreadyDecided(String),

    #[error("This gig is no longer open. Another freelancer may have just been hired.")]
    GigNotOpen,

    /// The winning bid failed its pending->hired write after the gig was
    /// assigned. Storage-layer or invariant violation, not user error.
    #[error("Hire left storage in an inconsistent state: {0}")]
    Inconsistent(&'static str),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Owns the hire transition from an open gig with a pending bid to an
/// assigned gig with one hired bid and all sibling bids rejected.
///
/// Stateless across requests: gig and bid records are owned by the storage
/// backend and are never cached here.
pub struct HireCoordinator {
    gigs: Arc<dyn GigStore>,
    bids: Arc<dyn BidStore>,
    events: HireEvents,
}

impl HireCoordinator {
    pub fn new(gigs: Arc<dyn GigStore>, bids: Arc<dyn BidStore>, events: HireEvents) -> Self {
        Self { gigs, bids, events }
    }

    /// Hire the freelancer behind `bid_id` on behalf of `requester_id`.
    ///
    /// On success the gig is `assigned`, the bid is `hired`, every other
    /// still-pending bid on the gig is `rejected`, and one hire event has
    /// been published. On any error no partial mutation exists beyond
    /// whichever atomic step committed.
    pub async fn hire(&self, requester_id: Uuid, bid_id: Uuid) -> Result<BidView, HireError> {
        let bid = self
            .bids
            .find_by_id(bid_id)
            .await?
            .ok_or(HireError::BidNotFound)?;

        let gig = self
            .gigs
            .find_by_id(bid.gig_id)
            .await?
            .ok_or(HireError::GigNotFound)?;

        if gig.owner_id != requester_id {
            return Err(HireError::NotGigOwner);
        }

        if bid.status != BidStatus::Pending.as_str() {
            return Err(HireError::BidAlreadyDecided(bid.status.clone()));
        }

        // The decision point. Exactly one concurrent request matches the
        // 'open' predicate; everyone else lost the race, no matter how far
        // their precondition checks got.
        let matched = self
            .gigs
            .conditional_update_status(gig.id, GigStatus::Open, GigStatus::Assigned)
            .await?;
        if matched == 0 {
            return Err(HireError::GigNotOpen);
        }

        // Promote the winner, still conditionally: under single-writer-per-bid
        // semantics this cannot miss, but a zero match here means the store
        // broke an invariant and the request must fail loudly.
        let promoted = self
            .bids
            .conditional_update_status(bid.id, BidStatus::Pending, BidStatus::Hired)
            .await?;
        if promoted == 0 {
            tracing::error!(
                bid_id = %bid.id,
                gig_id = %gig.id,
                "winning bid left pending state between validation and promotion"
            );
            return Err(HireError::Inconsistent(
                "winning bid was no longer pending after the gig was assigned",
            ));
        }

        let rejected = self.bids.reject_other_pending(gig.id, bid.id).await?;
        tracing::info!(gig_id = %gig.id, bid_id = %bid.id, rejected, "gig assigned");

        let view = self
            .bids
            .find_view(bid.id)
            .await?
            .ok_or(HireError::Inconsistent("hired bid vanished before re-read"))?;

        // Fire-and-forget: the hire is already durably committed, so a
        // notification problem must not fail the request.
        self.events.publish(HireEvent::for_view(&view));

        Ok(view)
    }
}
