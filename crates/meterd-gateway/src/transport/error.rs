//! HTTP surface for `MeterError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use meterd_core::error::MeterError;

/// `MeterError` rendered as the JSON error envelope:
/// `{"status": 404, "error": "NOT_FOUND", "message": "Not Found"}`.
#[derive(Debug)]
pub struct ApiError(pub MeterError);

impl From<MeterError> for ApiError {
    fn from(e: MeterError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
