//! Hire-event fan-out to live freelancer sessions.
//!
//! Consumes the in-process hire-event channel and pushes one `hired` frame to
//! every live session of the winning freelancer. Strictly best-effort: an
//! offline freelancer, a closed session, or a lagged channel never propagates
//! an error back toward the hire coordinator.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::domains::hiring::HireEvent;
use crate::notify::registry::SessionRegistry;

/// Fans hire events out to the winning freelancer's live sessions.
pub struct NotificationDispatcher {
    registry: SessionRegistry,
}

impl NotificationDispatcher {
    pub fn new(registry: SessionRegistry) -> Self {
        Self { registry }
    }

    /// Spawn the consumer loop; runs until the event channel closes.
    pub fn spawn(self, mut events: broadcast::Receiver<HireEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => self.deliver(event).await,
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "notification dispatcher lagged behind hire events");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Deliver one event to every live session of its freelancer.
    ///
    /// Zero live sessions is a normal outcome; a push failure on one session
    /// is logged and skipped so the others still receive the event.
    pub async fn deliver(&self, event: HireEvent) {
        let frame = serde_json::json!({
            "type": "hired",
            "message": event.message,
            "gig_id": event.gig_id,
            "gig_title": event.gig_title,
            "bid_id": event.bid_id,
            "timestamp": event.timestamp,
        });

        let sessions = self.registry.sessions_for(event.freelancer_id).await;
        if sessions.is_empty() {
            tracing::debug!(
                freelancer_id = %event.freelancer_id,
                "no live sessions for hire notification"
            );
            return;
        }

        for (session_id, tx) in sessions {
            if tx.send(frame.clone()).is_err() {
                tracing::warn!(
                    %session_id,
                    freelancer_id = %event.freelancer_id,
                    "dropping hire notification for closed session"
                );
            }
        }
    }
}
