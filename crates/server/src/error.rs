//! Unified error handling with Sentry integration.
//!
//! Every failure a handler can hit is an [`AppError`]. Handlers wrap it in
//! [`AdminError`] or [`StoreError`] together with the message their surface
//! reports for it; the wrapper's `IntoResponse` logs the failure once, captures
//! server errors to Sentry, and renders the surface's envelope.
//!
//! Handler panics are turned into [`AppError::Unexpected`] by a
//! `CatchPanicLayer` on each route, so they render the same way.

use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use commerce_routes_core::ValidationError;

use crate::db::RepositoryError;
use crate::envelope::{AdminEnvelope, StoreEnvelope};

/// Generic message for failures nothing more specific was said about.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Detail used when a panic payload is not a string.
const UNKNOWN_PANIC: &str = "handler panicked";

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DataAccess(#[from] RepositoryError),

    /// Anything else.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    /// Build an [`AppError::Unexpected`] from a caught panic payload.
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let detail = payload
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_string()))
            .unwrap_or_else(|| UNKNOWN_PANIC.to_string());
        Self::Unexpected(detail)
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::DataAccess(_) | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log the failure: server errors at error level with a Sentry event,
    /// rejected input at warn level.
    fn report(&self, context: &str) {
        match self {
            Self::Validation(err) => {
                tracing::warn!(field = err.field(), error = %err, "{context}");
            }
            Self::DataAccess(_) | Self::Unexpected(_) => {
                let event_id = sentry::capture_error(self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "{context}"
                );
            }
        }
    }

    /// Message shown to clients: the validation text, or `context` otherwise.
    fn client_message(&self, context: &str) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::DataAccess(_) | Self::Unexpected(_) => context.to_string(),
        }
    }
}

/// Failure on an `/admin` route.
#[derive(Debug)]
pub struct AdminError {
    context: &'static str,
    source: AppError,
}

impl AdminError {
    /// Wrap an error with the message the route reports for it.
    pub fn new(context: &'static str, source: impl Into<AppError>) -> Self {
        Self {
            context,
            source: source.into(),
        }
    }

    /// The wrapped error.
    #[must_use]
    pub const fn source(&self) -> &AppError {
        &self.source
    }
}

impl From<ValidationError> for AdminError {
    fn from(err: ValidationError) -> Self {
        Self::new("Admin request rejected", err)
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        self.source.report(self.context);

        let status = self.source.status_code();
        let message = self.source.client_message(self.context);
        // Admin clients get the underlying error text for server-side failures.
        let detail = match &self.source {
            AppError::Validation(_) => None,
            AppError::DataAccess(err) => Some(err.to_string()),
            AppError::Unexpected(msg) => Some(msg.clone()),
        };

        (status, Json(AdminEnvelope::fail(message, detail))).into_response()
    }
}

/// Failure on a `/store` route.
#[derive(Debug)]
pub struct StoreError {
    context: &'static str,
    source: AppError,
}

impl StoreError {
    /// Wrap an error with the message the route reports for it.
    pub fn new(context: &'static str, source: impl Into<AppError>) -> Self {
        Self {
            context,
            source: source.into(),
        }
    }

    /// The wrapped error.
    #[must_use]
    pub const fn source(&self) -> &AppError {
        &self.source
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        Self::new("Store request rejected", err)
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        self.source.report(self.context);

        let status = self.source.status_code();
        // Don't expose internal error details to store clients
        let message = self.source.client_message(self.context);

        (status, Json(StoreEnvelope::fail(status, message))).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::Validation(ValidationError::InvalidEmail);
        assert_eq!(err.to_string(), "Validation error: Invalid email format");

        let err = AppError::DataAccess(RepositoryError::NotFound);
        assert_eq!(err.to_string(), "Database error: not found");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::Validation(ValidationError::MissingAction).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::DataAccess(RepositoryError::NotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Unexpected("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_admin_validation_response() {
        let response = AdminError::from(ValidationError::MissingAction).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "message": "Action is required" })
        );
    }

    #[tokio::test]
    async fn test_admin_data_access_response_includes_detail() {
        let response = AdminError::new(
            "An error occurred while retrieving admin statistics",
            RepositoryError::Database(sqlx::Error::PoolTimedOut),
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            "An error occurred while retrieving admin statistics"
        );
        assert!(body["error"].as_str().unwrap().starts_with("database error"));
    }

    #[tokio::test]
    async fn test_store_validation_response() {
        let response = StoreError::from(ValidationError::InvalidRating).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "message": "Rating must be a number between 1 and 5",
                "status": 400,
                "error": "Bad Request"
            })
        );
    }

    #[tokio::test]
    async fn test_store_server_error_hides_detail() {
        let response = StoreError::new(
            "Error fetching featured products",
            RepositoryError::DataCorruption("secret table detail".to_string()),
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({
                "message": "Error fetching featured products",
                "status": 500,
                "error": "Internal Server Error"
            })
        );
    }

    #[tokio::test]
    async fn test_store_unexpected_hides_detail() {
        let response = StoreError::new(UNEXPECTED_MESSAGE, AppError::Unexpected("x".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({
                "message": "An unexpected error occurred",
                "status": 500,
                "error": "Internal Server Error"
            })
        );
    }

    #[test]
    fn test_from_panic_payloads() {
        let err = AppError::from_panic(Box::new("static message"));
        assert!(matches!(err, AppError::Unexpected(ref m) if m == "static message"));

        let err = AppError::from_panic(Box::new(String::from("owned message")));
        assert!(matches!(err, AppError::Unexpected(ref m) if m == "owned message"));

        let err = AppError::from_panic(Box::new(42_u8));
        assert!(matches!(err, AppError::Unexpected(ref m) if m == UNKNOWN_PANIC));
    }
}
