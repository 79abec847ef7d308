//! JSON envelopes returned by the custom routes.
//!
//! The admin and store surfaces use different shapes, matching what their
//! existing clients already parse:
//!
//! ```text
//! admin: { "success": bool, "message": str, "data"?: T, "error"?: str }
//! store: { "message": str, "status": u16, "data"?: T, "error"?: str }
//! ```
//!
//! Exactly one of `data` / `error` is present on a terminal response (admin
//! validation failures carry neither, only the message).

use axum::http::StatusCode;
use serde::Serialize;

/// Envelope for `/admin` routes.
#[derive(Debug, Serialize)]
pub struct AdminEnvelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AdminEnvelope<T> {
    /// A successful response carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }
}

impl AdminEnvelope<()> {
    /// A failed response, optionally with error detail.
    pub fn fail(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error,
        }
    }
}

/// Envelope for `/store` routes.
#[derive(Debug, Serialize)]
pub struct StoreEnvelope<T> {
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl<T> StoreEnvelope<T> {
    /// A successful response carrying `data`.
    pub fn ok(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            status: status.as_u16(),
            data: Some(data),
            error: None,
        }
    }
}

impl StoreEnvelope<()> {
    /// A failed response. `error` is the status code's reason phrase.
    pub fn fail(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: status.as_u16(),
            data: None,
            error: Some(status.canonical_reason().unwrap_or("Error")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_admin_ok_has_no_error() {
        let value = serde_json::to_value(AdminEnvelope::ok("done", json!({ "n": 1 }))).unwrap();
        assert_eq!(
            value,
            json!({ "success": true, "message": "done", "data": { "n": 1 } })
        );
    }

    #[test]
    fn test_admin_fail_without_detail() {
        let value = serde_json::to_value(AdminEnvelope::fail("Action is required", None)).unwrap();
        assert_eq!(
            value,
            json!({ "success": false, "message": "Action is required" })
        );
    }

    #[test]
    fn test_admin_fail_with_detail() {
        let value =
            serde_json::to_value(AdminEnvelope::fail("failed", Some("boom".to_string()))).unwrap();
        assert_eq!(
            value,
            json!({ "success": false, "message": "failed", "error": "boom" })
        );
    }

    #[test]
    fn test_store_fail_uses_reason_phrase() {
        let value =
            serde_json::to_value(StoreEnvelope::fail(StatusCode::BAD_REQUEST, "nope")).unwrap();
        assert_eq!(
            value,
            json!({ "message": "nope", "status": 400, "error": "Bad Request" })
        );

        let value = serde_json::to_value(StoreEnvelope::fail(
            StatusCode::INTERNAL_SERVER_ERROR,
            "broken",
        ))
        .unwrap();
        assert_eq!(value["error"], "Internal Server Error");
    }

    #[test]
    fn test_store_ok() {
        let value =
            serde_json::to_value(StoreEnvelope::ok(StatusCode::CREATED, "saved", json!([1])))
                .unwrap();
        assert_eq!(
            value,
            json!({ "message": "saved", "status": 201, "data": [1] })
        );
    }
}
