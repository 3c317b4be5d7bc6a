//! Shared error type across tally crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input or configuration.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Missing or wrong admin token.
    Unauthorized,
    /// Key-value backend failed.
    StoreUnavailable,
    /// No store binding configured.
    NotConfigured,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and config errors.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Unauthorized => "UNAUTHORIZED",
            ClientCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ClientCode::NotConfigured => "NOT_CONFIGURED",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("unauthorized")]
    Unauthorized,
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("storage not configured")]
    NotConfigured,
    #[error("internal: {0}")]
    Internal(String),
}

impl TallyError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            TallyError::BadRequest(_) => ClientCode::BadRequest,
            TallyError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            TallyError::Unauthorized => ClientCode::Unauthorized,
            TallyError::StoreUnavailable(_) => ClientCode::StoreUnavailable,
            TallyError::NotConfigured => ClientCode::NotConfigured,
            TallyError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Shorthand for wrapping a backend failure.
    pub fn store(msg: impl Into<String>) -> Self {
        TallyError::StoreUnavailable(msg.into())
    }
}
