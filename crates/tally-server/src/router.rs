//! Axum router wiring.
//!
//! Layer order, outermost first: preflight status fix, CORS, request tracing,
//! store-binding check, then the routes.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{
    api::{self, ApiError},
    app_state::AppState,
    ops,
};

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86400);

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/stats", get(api::stats::get_stats).fallback(api::not_found))
        .route("/visit", post(api::stats::record_visit).fallback(api::not_found))
        .route("/admin/reset", post(api::admin::reset).fallback(api::not_found));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(PREFLIGHT_MAX_AGE);

    Router::new()
        .route("/health", get(ops::health).fallback(api::not_found))
        .nest(&state.cfg().server.api_prefix, api)
        .fallback(api::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), require_store))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(preflight_no_content))
        .with_state(state)
}

/// Reject everything before routing when no store is bound.
async fn require_store(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if !state.has_store() {
        return ApiError::not_configured().into_response();
    }
    next.run(req).await
}

/// The CORS layer answers any OPTIONS request itself; report it as 204.
async fn preflight_no_content(req: Request, next: Next) -> Response {
    let is_options = req.method() == Method::OPTIONS;
    let mut resp = next.run(req).await;
    if is_options {
        *resp.status_mut() = StatusCode::NO_CONTENT;
    }
    resp
}
