use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::server::auth::SessionStore;

/// Authenticated user information from session
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

/// Middleware to extract session and populate auth user
///
/// Extracts the bearer token from the Authorization header, resolves it in
/// the SessionStore, and stores AuthUser in request extensions. It does NOT
/// block requests - handlers decide whether auth is required.
pub async fn session_auth_middleware(
    State(session_store): State<Arc<SessionStore>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(user) = extract_auth_user(request.headers(), session_store.as_ref()).await {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

async fn extract_auth_user(headers: &HeaderMap, session_store: &SessionStore) -> Option<AuthUser> {
    let auth_header = headers.get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let session = session_store.get_session(token).await?;

    Some(AuthUser {
        user_id: session.user_id,
        name: session.name,
        email: session.email,
    })
}
