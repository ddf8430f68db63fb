//! Concurrency tests: the conditional gig update must admit exactly one
//! winner no matter how hire attempts interleave.

mod common;

use common::{create_test_bid, create_test_gig, create_test_user, TestHarness};
use gigflow_core::domains::bids::Bid;
use gigflow_core::domains::gigs::Gig;
use gigflow_core::domains::hiring::HireError;
use gigflow_core::server::app::build_app;
use test_context::test_context;
use uuid::Uuid;

#[test_context(TestHarness)]
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_hires_on_distinct_bids_produce_one_winner(ctx: &mut TestHarness) {
    let (_, state) = build_app(ctx.db_pool.clone());
    let coordinator = state.coordinator.clone();

    let owner = create_test_user(&ctx.db_pool, "Uma").await.unwrap();
    let gig = create_test_gig(&ctx.db_pool, owner.id, "Data pipeline")
        .await
        .unwrap();

    let mut bid_ids: Vec<Uuid> = Vec::new();
    for i in 0..6 {
        let freelancer = create_test_user(&ctx.db_pool, &format!("F{i}")).await.unwrap();
        let bid = create_test_bid(&ctx.db_pool, gig.id, freelancer.id, 100 + i)
            .await
            .unwrap();
        bid_ids.push(bid.id);
    }

    let handles: Vec<_> = bid_ids
        .iter()
        .map(|&bid_id| {
            let coordinator = coordinator.clone();
            let owner_id = owner.id;
            tokio::spawn(async move { coordinator.hire(owner_id, bid_id).await })
        })
        .collect();

    let mut winners = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(view) => winners.push(view),
            // Losers must see a conflict, never an outcome implying they
            // might still win.
            Err(HireError::GigNotOpen) | Err(HireError::BidAlreadyDecided(_)) => {}
            Err(other) => panic!("unexpected loser outcome: {other}"),
        }
    }
    assert_eq!(winners.len(), 1, "exactly one hire attempt must win");

    // End state: one hired bid, everything else rejected, gig assigned.
    let gig_after = Gig::find_by_id(gig.id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(gig_after.status, "assigned");

    let bids_after = Bid::find_for_gig(gig.id, &ctx.db_pool).await.unwrap();
    let hired: Vec<_> = bids_after.iter().filter(|b| b.status == "hired").collect();
    assert_eq!(hired.len(), 1);
    assert_eq!(hired[0].id, winners[0].id);
    assert!(bids_after
        .iter()
        .all(|b| b.status == "hired" || b.status == "rejected"));
}

#[test_context(TestHarness)]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_hires_on_the_same_bid_succeed_once(ctx: &mut TestHarness) {
    let (_, state) = build_app(ctx.db_pool.clone());
    let coordinator = state.coordinator.clone();

    let owner = create_test_user(&ctx.db_pool, "Uma").await.unwrap();
    let freelancer = create_test_user(&ctx.db_pool, "Fay").await.unwrap();
    let gig = create_test_gig(&ctx.db_pool, owner.id, "Copywriting")
        .await
        .unwrap();
    let bid = create_test_bid(&ctx.db_pool, gig.id, freelancer.id, 40)
        .await
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let coordinator = coordinator.clone();
            let owner_id = owner.id;
            let bid_id = bid.id;
            tokio::spawn(async move { coordinator.hire(owner_id, bid_id).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(HireError::GigNotOpen) | Err(HireError::BidAlreadyDecided(_)) => {}
            Err(other) => panic!("unexpected outcome: {other}"),
        }
    }
    assert_eq!(successes, 1);

    let bid_after = Bid::find_by_id(bid.id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(bid_after.status, "hired");
}
