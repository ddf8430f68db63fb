//! The hire transition: race-safe selection of one winning bid per gig.

pub mod coordinator;
pub mod events;
pub mod store;

pub use coordinator::{HireCoordinator, HireError};
pub use events::{HireEvent, HireEvents};
pub use store::{BidStore, GigStore, PgBidStore, PgGigStore};
