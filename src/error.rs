//! Application error type and its HTTP mapping.
//!
//! Every failure that can reach a handler is an [`AppError`]. The HTTP status
//! is derived from the variant alone; message text is for humans only.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicBool, Ordering};

/// When false, details of internal and storage errors are stripped from responses.
static EXPOSE_INTERNAL_DETAILS: AtomicBool = AtomicBool::new(false);

/// Enables or disables internal error details in HTTP responses.
///
/// Called once at startup from [`crate::server::run`]; only development
/// deployments should turn this on.
pub fn set_expose_internal_details(expose: bool) {
    EXPOSE_INTERNAL_DETAILS.store(expose, Ordering::Relaxed);
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed input. User-correctable.
    #[error("validation error: {message}")]
    Validation { message: String, details: Value },
    /// A record with the same keyword already exists.
    #[error("duplicate keyword: {message}")]
    Duplicate { message: String, details: Value },
    #[error("not found: {message}")]
    NotFound { message: String, details: Value },
    /// The backing store could not be reached or failed a query.
    #[error("store unavailable: {message}")]
    StoreUnavailable { message: String, details: Value },
    #[error("internal error: {message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn duplicate(message: impl Into<String>, details: Value) -> Self {
        Self::Duplicate {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true for errors that should make the storage adapter fall back.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }

    /// HTTP status for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::Duplicate { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its client-facing payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let expose = EXPOSE_INTERNAL_DETAILS.load(Ordering::Relaxed);
        let (code, message, details) = match self {
            Self::Validation { message, details } => ("validation_error", message, details.clone()),
            Self::Duplicate { message, details } => {
                ("duplicate_keyword", message, details.clone())
            }
            Self::NotFound { message, details } => ("not_found", message, details.clone()),
            Self::StoreUnavailable { message, details } => (
                "store_unavailable",
                message,
                if expose { details.clone() } else { json!({}) },
            ),
            Self::Internal { message, details } => (
                "internal_error",
                message,
                if expose { details.clone() } else { json!({}) },
            ),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();

        AppError::bad_request("Invalid request body", json!({ "fields": fields }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let reason = match &rejection {
            JsonRejection::MissingJsonContentType(_) => "missing_content_type",
            JsonRejection::JsonSyntaxError(_) => "syntax",
            JsonRejection::JsonDataError(_) => "data",
            _ => "body",
        };

        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": reason, "detail": rejection.body_text() }),
        )
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::duplicate(
                "Keyword already exists",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::store_unavailable("Database error", json!({ "reason": e.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::duplicate("x", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::store_unavailable("x", json!({})).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::internal("x", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::duplicate("Keyword already exists", json!({}))
                .to_error_info()
                .code,
            "duplicate_keyword"
        );
        assert_eq!(
            AppError::bad_request("bad", json!({})).to_error_info().code,
            "validation_error"
        );
    }

    #[test]
    fn test_validation_details_are_kept() {
        let info = AppError::bad_request("bad", json!({ "field": "keyword" })).to_error_info();
        assert_eq!(info.details["field"], "keyword");
    }

    #[test]
    fn test_sqlx_row_not_found_maps_to_store_unavailable() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(err.is_store_unavailable());
    }
}
