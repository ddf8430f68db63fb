//! Registry of live notification sessions, keyed by user identity.
//!
//! A session registers once, when its WebSocket connection has authenticated,
//! and is addressable under that identity until it unregisters. One user may
//! hold several sessions at a time (multiple devices); all of them are
//! returned by the lookup.
//!
//! Payloads are `serde_json::Value` - the registry has no knowledge of what is
//! being pushed.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

pub type SessionId = Uuid;

type SessionSender = mpsc::UnboundedSender<serde_json::Value>;

/// Thread-safe, cloneable session registry.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, HashMap<SessionId, SessionSender>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a live session for `user_id`.
    ///
    /// Returns the session id (needed to unregister) and the receiving end
    /// the transport should drain.
    pub async fn register(
        &self,
        user_id: Uuid,
    ) -> (SessionId, mpsc::UnboundedReceiver<serde_json::Value>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session_id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        sessions.entry(user_id).or_default().insert(session_id, tx);
        (session_id, rx)
    }

    /// Remove a session, pruning the user's entry when it was the last one.
    pub async fn unregister(&self, user_id: Uuid, session_id: SessionId) {
        let mut sessions = self.sessions.write().await;
        if let Some(user_sessions) = sessions.get_mut(&user_id) {
            user_sessions.remove(&session_id);
            if user_sessions.is_empty() {
                sessions.remove(&user_id);
            }
        }
    }

    /// All live session senders for a user. Possibly empty - an offline
    /// recipient is not an error.
    pub async fn sessions_for(&self, user_id: Uuid) -> Vec<(SessionId, SessionSender)> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&user_id)
            .map(|user_sessions| {
                user_sessions
                    .iter()
                    .map(|(id, tx)| (*id, tx.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total number of live sessions across all users.
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.values().map(HashMap::len).sum()
    }
}
