//! Hire endpoint.
//!
//! PATCH /api/bids/:bid_id/hire
//!
//! The exposed contract of the hire coordinator: bearer-auth'd gig owners
//! select one pending bid as winner and get back the materialized hired-bid
//! view. Everything interesting happens in `HireCoordinator::hire`; this
//! module only maps identities in and error kinds out.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::domains::hiring::HireError;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

impl IntoResponse for HireError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            HireError::BidNotFound | HireError::GigNotFound => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            HireError::NotGigOwner => (StatusCode::FORBIDDEN, self.to_string()),
            HireError::BidAlreadyDecided(_) | HireError::GigNotOpen => {
                (StatusCode::CONFLICT, self.to_string())
            }
            HireError::Inconsistent(detail) => {
                tracing::error!(detail, "hire failed on an internal consistency check");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
            HireError::Storage(err) => {
                tracing::error!(error = %err, "hire failed on a storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
        };

        let body = serde_json::json!({ "message": message });
        (status, Json(body)).into_response()
    }
}

/// Hire handler. Requires an authenticated caller; ownership and bid state
/// are enforced by the coordinator.
pub async fn hire_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(bid_id): Path<Uuid>,
) -> Response {
    let Some(Extension(user)) = auth else {
        let body = serde_json::json!({ "message": "Authentication required" });
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    };

    match state.coordinator.hire(user.user_id, bid_id).await {
        Ok(view) => Json(view).into_response(),
        Err(err) => err.into_response(),
    }
}
