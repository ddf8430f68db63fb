//! Test fixtures for creating test data.
//!
//! Thin wrappers over the model methods; emails get a random suffix so tests
//! sharing the database never collide on the unique constraint.

use anyhow::Result;
use gigflow_core::domains::bids::Bid;
use gigflow_core::domains::gigs::Gig;
use gigflow_core::domains::users::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a test user with a unique email
pub async fn create_test_user(pool: &PgPool, name: &str) -> Result<User> {
    let email = format!("{}-{}@example.com", name.to_lowercase(), Uuid::new_v4());
    User::create(name, &email, pool).await
}

/// Create an open test gig
pub async fn create_test_gig(pool: &PgPool, owner_id: Uuid, title: &str) -> Result<Gig> {
    Gig::create(owner_id, title, "Test gig description", 500, pool).await
}

/// Create a pending test bid
pub async fn create_test_bid(
    pool: &PgPool,
    gig_id: Uuid,
    freelancer_id: Uuid,
    price: i64,
) -> Result<Bid> {
    Bid::create(gig_id, freelancer_id, "I can do this", price, pool).await
}
