//! Shared error type across meterd crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Lookup by id or slug missed.
    NotFound,
    /// Request body failed to decode or bind.
    InvalidRequest,
    /// Response could not be serialized.
    RenderFailed,
    /// Invalid configuration or malformed input outside a request body.
    BadRequest,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::InvalidRequest => "INVALID_REQUEST",
            ClientCode::RenderFailed => "RENDER_FAILED",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status carried by responses with this code.
    pub fn http_status(self) -> u16 {
        match self {
            ClientCode::NotFound => 404,
            ClientCode::InvalidRequest | ClientCode::BadRequest => 400,
            ClientCode::RenderFailed => 422,
            ClientCode::Internal => 500,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MeterError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum MeterError {
    #[error("Not Found")]
    NotFound,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Error rendering response: {0}")]
    Render(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MeterError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MeterError::NotFound => ClientCode::NotFound,
            MeterError::InvalidRequest(_) => ClientCode::InvalidRequest,
            MeterError::Render(_) => ClientCode::RenderFailed,
            MeterError::BadRequest(_) => ClientCode::BadRequest,
            MeterError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Shorthand for [`ClientCode::http_status`].
    pub fn http_status(&self) -> u16 {
        self.client_code().http_status()
    }
}
