//! JSON API handlers.
//!
//! Every response is a JSON envelope with a `success` flag. Failures go
//! through [`ApiError`] so store details are logged, never returned.

pub mod admin;
pub mod error;
pub mod stats;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::app_state::AppState;

pub use error::ApiError;

/// Fallback for any unmatched path or method.
pub async fn not_found(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Not Found",
            "availableEndpoints": state.available_endpoints(),
        })),
    )
}
