//! In-memory session lookup.
//!
//! This is the narrow seam to the external auth collaborator: whatever issues
//! credentials calls `create_session` and hands the opaque bearer token to the
//! client; everything in this crate only ever resolves tokens back to an
//! identity. Sessions expire after 24 hours.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session token (random UUID)
pub type SessionToken = String;

const SESSION_TTL_HOURS: i64 = 24;

/// Identity resolved from a session token
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created_at) >= Duration::hours(SESSION_TTL_HOURS)
    }
}

/// In-memory session store
#[derive(Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new session and return its bearer token
    pub async fn create_session(&self, session: Session) -> SessionToken {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), session);
        token
    }

    /// Resolve a token to its session, if still valid
    pub async fn get_session(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(token)?;
        if session.is_expired(Utc::now()) {
            return None;
        }
        Some(session.clone())
    }

    /// Delete session (logout)
    pub async fn delete_session(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
    }

    /// Drop expired sessions (run periodically)
    pub async fn cleanup_expired(&self) {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| !session.is_expired(now));
    }
}
