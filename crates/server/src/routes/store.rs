//! Storefront route handlers.
//!
//! - `GET /store/custom` - featured products for a store
//! - `POST /store/custom` - customer feedback

use std::any::Any;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use commerce_routes_core::{Rating, ValidationError};
use commerce_routes_core::validation::{self, FeedbackInput};

use super::json_body;
use crate::envelope::StoreEnvelope;
use crate::error::{AppError, StoreError, UNEXPECTED_MESSAGE};
use crate::models::{FeedbackReceipt, Product, StoreInfo};
use crate::services::FeaturedProductsFilter;
use crate::state::AppState;

const PRODUCTS_FAILED: &str = "Error fetching featured products";
const FEEDBACK_RECEIVED: &str = "Feedback received successfully";
const FEEDBACK_FAILED: &str = "An error occurred while processing your feedback";

/// Query parameters for the featured products listing.
#[derive(Debug, Default, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<String>,
    pub store_id: Option<String>,
}

/// Body of `GET /store/custom`.
#[derive(Debug, Serialize)]
pub struct FeaturedProductsResponse {
    pub store: StoreInfo,
    pub featured_products: Vec<Product>,
    #[serde(serialize_with = "crate::models::timestamp::serialize")]
    pub timestamp: DateTime<Utc>,
}

/// Featured products, newest first, gift cards excluded.
///
/// A failed store lookup is not fatal: the response carries
/// [`StoreInfo::fallback`] instead.
///
/// # Errors
///
/// Returns 400 for an invalid `limit` and 500 if the product listing fails.
#[instrument(skip_all)]
pub async fn featured(
    State(state): State<AppState>,
    query: Result<Query<FeaturedQuery>, QueryRejection>,
) -> Result<Json<FeaturedProductsResponse>, StoreError> {
    tracing::info!("Fetching featured products");

    let Query(query) =
        query.map_err(|rejection| ValidationError::MalformedQuery(rejection.body_text()))?;
    let limit = validation::featured_limit(query.limit.as_deref())?;
    let store_id = validation::store_id(query.store_id.as_deref());

    let store = match state.services().retrieve_store(store_id).await {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!(store_id, error = %e, "Store lookup failed, using default store");
            StoreInfo::fallback()
        }
    };

    let featured_products = state
        .services()
        .list_featured_products(FeaturedProductsFilter::new(limit))
        .await
        .map_err(|e| StoreError::new(PRODUCTS_FAILED, e))?;

    tracing::info!(
        limit = limit.get(),
        count = featured_products.len(),
        "Featured products fetched"
    );

    Ok(Json(FeaturedProductsResponse {
        store,
        featured_products,
        timestamp: Utc::now(),
    }))
}

/// Accept a feedback submission.
///
/// # Errors
///
/// Returns 400 if email or feedback is missing, the email is malformed, or
/// the rating is outside `1..=5`.
#[instrument(skip_all)]
pub async fn feedback(
    payload: Result<Json<FeedbackInput>, JsonRejection>,
) -> Result<(StatusCode, Json<StoreEnvelope<FeedbackReceipt>>), StoreError> {
    tracing::info!("Processing feedback submission");

    let submission = validation::feedback(json_body(payload)?)?;
    let receipt = FeedbackReceipt::acknowledge(submission, Utc::now());

    tracing::info!(
        feedback_id = %receipt.id,
        email_domain = receipt.email.domain(),
        rating = receipt.rating.map(Rating::get),
        "Feedback received"
    );

    Ok((
        StatusCode::CREATED,
        Json(StoreEnvelope::ok(
            StatusCode::CREATED,
            FEEDBACK_RECEIVED,
            receipt,
        )),
    ))
}

/// Response for a panic inside [`featured`].
pub fn featured_panicked(payload: Box<dyn Any + Send + 'static>) -> Response {
    StoreError::new(UNEXPECTED_MESSAGE, AppError::from_panic(payload)).into_response()
}

/// Response for a panic inside [`feedback`].
pub fn feedback_panicked(payload: Box<dyn Any + Send + 'static>) -> Response {
    StoreError::new(FEEDBACK_FAILED, AppError::from_panic(payload)).into_response()
}
