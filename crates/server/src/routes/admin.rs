//! Admin dashboard route handlers.
//!
//! - `GET /admin/custom` - entity counts for the dashboard
//! - `POST /admin/custom` - run a maintenance action

use std::any::Any;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::instrument;

use commerce_routes_core::validation::{self, ActionInput};

use super::json_body;
use crate::envelope::AdminEnvelope;
use crate::error::{AdminError, AppError};
use crate::models::{ActionResult, StatsResult};
use crate::state::AppState;

const STATS_RETRIEVED: &str = "Admin dashboard statistics retrieved successfully";
const STATS_FAILED: &str = "An error occurred while retrieving admin statistics";
const ACTION_FAILED: &str = "An error occurred while processing the custom action";

/// Dashboard statistics.
///
/// # Errors
///
/// Returns 500 with the underlying error text if any count fails.
#[instrument(skip(state))]
pub async fn stats(
    State(state): State<AppState>,
) -> Result<Json<AdminEnvelope<StatsResult>>, AdminError> {
    tracing::info!("Retrieving admin dashboard statistics");

    let counts = state
        .services()
        .entity_counts()
        .await
        .map_err(|e| AdminError::new(STATS_FAILED, e))?;

    Ok(Json(AdminEnvelope::ok(
        STATS_RETRIEVED,
        StatsResult::new(counts, Utc::now()),
    )))
}

/// Run an admin action.
///
/// # Errors
///
/// Returns 400 if `action` is missing or not a known action.
#[instrument(skip_all)]
pub async fn action(
    payload: Result<Json<ActionInput>, JsonRejection>,
) -> Result<Json<AdminEnvelope<ActionResult>>, AdminError> {
    tracing::info!("Processing admin action");

    let input = json_body(payload)?;
    let action = validation::admin_action(&input)?;

    let result = ActionResult::perform(action, Utc::now());
    tracing::info!(%action, status = ?result.status, "Admin action processed");

    Ok(Json(AdminEnvelope::ok(
        format!("Action '{action}' processed successfully"),
        result,
    )))
}

/// Response for a panic inside [`stats`].
pub fn stats_panicked(payload: Box<dyn Any + Send + 'static>) -> Response {
    AdminError::new(STATS_FAILED, AppError::from_panic(payload)).into_response()
}

/// Response for a panic inside [`action`].
pub fn action_panicked(payload: Box<dyn Any + Send + 'static>) -> Response {
    AdminError::new(ACTION_FAILED, AppError::from_panic(payload)).into_response()
}
