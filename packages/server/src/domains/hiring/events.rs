//! In-process hand-off between the hire transition and notification fan-out.
//!
//! Single producer (the hire coordinator, after its atomic transition
//! commits), multiple consumers (the notification dispatcher, plus any test
//! that subscribes). Events are ephemeral values; nothing is persisted or
//! retried.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domains::bids::BidView;

/// Payload delivered to the winning freelancer's live sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HireEvent {
    pub freelancer_id: Uuid,
    pub gig_id: Uuid,
    pub gig_title: String,
    pub bid_id: Uuid,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl HireEvent {
    /// Build the event from the materialized hired-bid view.
    pub fn for_view(view: &BidView) -> Self {
        Self {
            freelancer_id: view.freelancer_id,
            gig_id: view.gig_id,
            gig_title: view.gig_title.clone(),
            bid_id: view.id,
            message: format!("You have been hired for {}!", view.gig_title),
            timestamp: Utc::now(),
        }
    }
}

/// Broadcast channel for hire events.
///
/// Thread-safe, cloneable. Publishing with no live subscriber is a no-op:
/// the hire itself is already durably committed, so delivery is strictly
/// best-effort.
#[derive(Clone)]
pub struct HireEvents {
    tx: broadcast::Sender<HireEvent>,
}

impl HireEvents {
    /// Create a channel with default capacity (256 buffered events).
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish one event. Never fails back into the caller.
    pub fn publish(&self, event: HireEvent) {
        // Ignore send errors (no active receivers)
        let _ = self.tx.send(event);
    }

    /// Subscribe to hire events.
    pub fn subscribe(&self) -> broadcast::Receiver<HireEvent> {
        self.tx.subscribe()
    }
}

impl Default for HireEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> HireEvent {
        HireEvent {
            freelancer_id: Uuid::new_v4(),
            gig_id: Uuid::new_v4(),
            gig_title: "Build a landing page".to_string(),
            bid_id: Uuid::new_v4(),
            message: "You have been hired for Build a landing page!".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn publish_reaches_all_subscribers() {
        let events = HireEvents::new();
        let mut rx1 = events.subscribe();
        let mut rx2 = events.subscribe();

        events.publish(sample_event());

        assert_eq!(rx1.recv().await.unwrap().gig_title, "Build a landing page");
        assert_eq!(rx2.recv().await.unwrap().gig_title, "Build a landing page");
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_noop() {
        let events = HireEvents::new();
        // Should not panic or error
        events.publish(sample_event());
    }
}
