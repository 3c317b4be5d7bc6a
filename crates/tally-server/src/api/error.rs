//! HTTP mapping for `TallyError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use tally_core::error::{ClientCode, TallyError};

/// Message used whenever the store binding is missing.
pub const NOT_CONFIGURED_MSG: &str = "Storage not configured";

/// An error plus the human-readable message shown to the caller.
#[derive(Debug)]
pub struct ApiError {
    err: TallyError,
    message: &'static str,
}

impl ApiError {
    pub fn new(err: TallyError, message: &'static str) -> Self {
        Self { err, message }
    }

    pub fn not_configured() -> Self {
        Self::new(TallyError::NotConfigured, NOT_CONFIGURED_MSG)
    }

    pub fn status(&self) -> StatusCode {
        match self.err.client_code() {
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ClientCode::StoreUnavailable | ClientCode::NotConfigured | ClientCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.err.client_code().as_str();
        if status.is_server_error() {
            tracing::error!(code, error = %self.err, "{}", self.message);
        } else {
            tracing::warn!(code, error = %self.err, "{}", self.message);
        }

        let body = Json(json!({
            "success": false,
            "error": self.message,
        }));
        (status, body).into_response()
    }
}
