//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    middleware,
    routing::{get, patch},
    Router,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::domains::hiring::{HireCoordinator, HireEvents, PgBidStore, PgGigStore};
use crate::notify::{NotificationDispatcher, SessionRegistry};
use crate::server::auth::SessionStore;
use crate::server::middleware::session_auth_middleware;
use crate::server::routes::{health_handler, hire_handler, notifications_ws_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub coordinator: Arc<HireCoordinator>,
    pub hire_events: HireEvents,
    pub registry: SessionRegistry,
    pub session_store: Arc<SessionStore>,
}

/// Build the Axum application router.
///
/// Wires the hire coordinator against the Postgres stores, spawns the
/// notification dispatcher on the hire-event channel, and returns the state
/// alongside the router so callers (main, tests) can reach the components
/// directly.
pub fn build_app(pool: PgPool) -> (Router, AppState) {
    let hire_events = HireEvents::new();
    let registry = SessionRegistry::new();
    let session_store = Arc::new(SessionStore::new());

    let coordinator = Arc::new(HireCoordinator::new(
        Arc::new(PgGigStore::new(pool.clone())),
        Arc::new(PgBidStore::new(pool.clone())),
        hire_events.clone(),
    ));

    // The dispatcher consumes hire events for as long as the channel lives.
    NotificationDispatcher::new(registry.clone()).spawn(hire_events.subscribe());

    let state = AppState {
        db_pool: pool,
        coordinator,
        hire_events,
        registry,
        session_store: session_store.clone(),
    };

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/bids/:bid_id/hire", patch(hire_handler))
        .route("/api/notifications/ws", get(notifications_ws_handler))
        .layer(middleware::from_fn_with_state(
            session_store,
            session_auth_middleware,
        ))
        .layer(Extension(state.clone()))
        .layer(TraceLayer::new_for_http());

    (router, state)
}
