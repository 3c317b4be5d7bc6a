//! Operational HTTP endpoints.
//!
//! - `/health` : liveness, no store access

use axum::{extract::State, Json};
use serde_json::{json, Value};

use tally_core::clock::iso_timestamp;

use crate::app_state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": iso_timestamp(state.clock().now()),
        "service": state.cfg().server.service_name,
    }))
}
