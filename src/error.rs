use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Per-field validation messages, keyed by request field name.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Unified application error type that maps to JSON HTTP responses.
///
/// Body format: `{ "error": { "code": "...", "message": "...", "fields": { ... } } }`,
/// where `fields` is only present on validation failures.
#[derive(Debug)]
pub enum AppError {
    /// 401 Unauthorized
    Unauthorized(String),
    /// 403 Forbidden
    Forbidden(String),
    /// 404 Not Found
    NotFound(String),
    /// 409 Conflict
    Conflict(String),
    /// 422 Unprocessable Entity with field-level messages
    Validation(FieldErrors),
    /// 422 Unprocessable Entity: the voucher has no stock left
    OutOfStock,
    /// 500 Internal Server Error (wraps any error, logs details, returns generic message)
    Internal(anyhow::Error),
}

impl AppError {
    /// Single-field validation failure.
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation(BTreeMap::from([(field, message.into())]))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg, None),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg, None),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg, None),
            Self::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                "The given data was invalid.".to_string(),
                Some(fields),
            ),
            Self::OutOfStock => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "OUT_OF_STOCK",
                "Voucher is out of stock".to_string(),
                None,
            ),
            Self::Internal(err) => {
                tracing::error!("Internal server error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Some(fields) = fields {
            error["fields"] = json!(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

/// Allow `?` to automatically convert any `anyhow::Error` into `AppError::Internal`.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
