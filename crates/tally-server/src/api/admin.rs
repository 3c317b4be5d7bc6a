//! Development-only admin endpoint.
//!
//! Optionally gated by `admin.token` (header `X-Admin-Token`).

use axum::{extract::State, http::HeaderMap, Json};
use serde_json::{json, Value};

use tally_core::error::TallyError;

use crate::api::ApiError;
use crate::app_state::AppState;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// `POST {prefix}/admin/reset`
pub async fn reset(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let presented = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());
    if !state.admin_authorized(presented) {
        return Err(ApiError::new(TallyError::Unauthorized, "Unauthorized"));
    }

    let counter = state.counter().map_err(|_| ApiError::not_configured())?;
    counter
        .reset()
        .await
        .map_err(|e| ApiError::new(e, "Failed to reset statistics"))?;

    Ok(Json(json!({
        "success": true,
        "message": "Statistics reset",
    })))
}
