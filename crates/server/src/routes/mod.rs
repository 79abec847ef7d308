//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health          - Liveness check
//! GET  /health/ready    - Readiness check (database connection)
//!
//! # Admin (ADMIN_CORS)
//! GET  /admin/custom    - Dashboard statistics
//! POST /admin/custom    - Run an admin action
//!
//! # Store (STORE_CORS)
//! GET  /store/custom    - Featured products (?limit=&store_id=)
//! POST /store/custom    - Submit feedback
//! ```

pub mod admin;
pub mod store;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    handler::Handler,
    http::StatusCode,
    middleware,
    routing::get,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use commerce_routes_core::ValidationError;

use crate::middleware::{cors_layer, request_id_middleware};
use crate::state::AppState;

/// Create the admin routes router.
///
/// Each handler renders its own 500 envelope if it panics.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/custom",
        get(admin::stats.layer(CatchPanicLayer::custom(admin::stats_panicked)))
            .post(admin::action.layer(CatchPanicLayer::custom(admin::action_panicked))),
    )
}

/// Create the store routes router.
///
/// Each handler renders its own 500 envelope if it panics.
pub fn store_routes() -> Router<AppState> {
    Router::new().route(
        "/custom",
        get(store::featured.layer(CatchPanicLayer::custom(store::featured_panicked)))
            .post(store::feedback.layer(CatchPanicLayer::custom(store::feedback_panicked))),
    )
}

/// Build the complete application router.
pub fn router(state: AppState) -> Router {
    let admin_cors = cors_layer("admin", &state.config().http.admin_cors);
    let store_cors = cors_layer("store", &state.config().http.store_cors);

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/admin", admin_routes().layer(admin_cors))
        .nest("/store", store_routes().layer(store_cors))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.services().check_connection().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Unwrap a JSON body, turning extractor rejections into a validation error
/// so they render in the route's own envelope.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ValidationError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))
}
