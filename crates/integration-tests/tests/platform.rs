//! Health checks, request IDs and CORS.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use tower::ServiceExt;

use commerce_routes_integration_tests::{ADMIN_ORIGIN, STORE_ORIGIN, StubServices, app};

#[tokio::test]
async fn test_health_is_ok() {
    let response = app(Arc::new(StubServices::default()))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_follows_database() {
    let up = app(Arc::new(StubServices::default()))
        .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(up.status(), StatusCode::OK);

    let down = app(Arc::new(StubServices::default().database_down()))
        .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(down.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let response = app(Arc::new(StubServices::default()))
        .oneshot(Request::get("/admin/custom").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

async fn preflight(path: &str, origin: &str) -> Option<String> {
    let response = app(Arc::new(StubServices::default()))
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri(path)
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_cors_is_scoped_per_surface() {
    assert_eq!(
        preflight("/store/custom", STORE_ORIGIN).await.as_deref(),
        Some(STORE_ORIGIN)
    );
    assert_eq!(
        preflight("/admin/custom", ADMIN_ORIGIN).await.as_deref(),
        Some(ADMIN_ORIGIN)
    );

    assert_eq!(preflight("/store/custom", ADMIN_ORIGIN).await, None);
    assert_eq!(preflight("/admin/custom", STORE_ORIGIN).await, None);
}
