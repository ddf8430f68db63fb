//! WebSocket notification endpoint.
//!
//! GET /api/notifications/ws?token=SESSION_TOKEN
//!
//! Auth strategy: the session token is passed as `?token=` (browsers cannot
//! set custom headers on a WebSocket upgrade), with the Authorization header
//! as a fallback for non-browser clients. After the upgrade the socket is
//! registered under the session's user id and receives every frame the
//! dispatcher addresses to that identity until it disconnects.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Extension, Query,
    },
    http::{HeaderMap, StatusCode},
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use uuid::Uuid;

use crate::notify::SessionRegistry;
use crate::server::app::AppState;

#[derive(Deserialize)]
pub struct NotificationsQuery {
    /// Session token for authentication
    token: Option<String>,
}

/// WebSocket handler; rejects before upgrading when the token is missing or
/// does not resolve to a live session.
pub async fn notifications_ws_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<NotificationsQuery>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let token = query
        .token
        .or_else(|| extract_bearer_token(&headers))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let session = state
        .session_store
        .get_session(&token)
        .await
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let registry = state.registry.clone();
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, registry, session.user_id)))
}

async fn handle_socket(socket: WebSocket, registry: SessionRegistry, user_id: Uuid) {
    let (session_id, mut outbound) = registry.register(user_id).await;
    tracing::info!(%user_id, %session_id, "notification session connected");

    let (mut sender, mut receiver) = socket.split();

    // Greeting frame so clients can confirm the subscription is live.
    let connected = serde_json::json!({ "type": "connected" }).to_string();
    if sender.send(Message::Text(connected)).await.is_err() {
        registry.unregister(user_id, session_id).await;
        return;
    }

    loop {
        tokio::select! {
            frame = outbound.recv() => {
                match frame {
                    Some(value) => {
                        if sender.send(Message::Text(value.to_string())).await.is_err() {
                            break;
                        }
                    }
                    // Registry side closed; nothing more to deliver.
                    None => break,
                }
            }
            inbound = receiver.next() => {
                match inbound {
                    // Clients only listen on this socket; ignore pings and
                    // stray frames, stop on close or transport error.
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    registry.unregister(user_id, session_id).await;
    tracing::info!(%user_id, %session_id, "notification session disconnected");
}

/// Extract Bearer token from Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get("authorization")?.to_str().ok()?;
    auth.strip_prefix("Bearer ").map(|t| t.to_string())
}
