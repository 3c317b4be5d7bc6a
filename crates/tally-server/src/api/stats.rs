use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::ApiError;
use crate::app_state::AppState;

/// `GET {prefix}/stats`
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let counter = state.counter().map_err(|_| ApiError::not_configured())?;
    let stats = counter
        .stats()
        .await
        .map_err(|e| ApiError::new(e, "Failed to fetch statistics"))?;

    Ok(Json(json!({
        "success": true,
        "data": stats,
    })))
}

/// `POST {prefix}/visit`. The request body is ignored.
pub async fn record_visit(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let counter = state.counter().map_err(|_| ApiError::not_configured())?;
    let stats = counter
        .record_visit()
        .await
        .map_err(|e| ApiError::new(e, "Failed to record visit"))?;

    // detached: the response is never held for the sweep
    drop(counter.spawn_cleanup());

    Ok(Json(json!({
        "success": true,
        "data": stats,
        "message": "Visit recorded",
    })))
}
