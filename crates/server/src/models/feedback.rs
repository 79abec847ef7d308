//! Feedback receipt.

use chrono::{DateTime, Utc};
use serde::Serialize;

use commerce_routes_core::validation::FeedbackSubmission;
use commerce_routes_core::{Email, FeedbackId, Rating};

/// What the client gets back for an accepted feedback submission.
///
/// Submissions are not stored; the id is minted from the receipt time.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackReceipt {
    pub id: FeedbackId,
    pub email: Email,
    pub feedback: String,
    pub rating: Option<Rating>,
    #[serde(serialize_with = "super::timestamp::serialize")]
    pub created_at: DateTime<Utc>,
}

impl FeedbackReceipt {
    /// Acknowledge a submission received at `now`.
    #[must_use]
    pub fn acknowledge(submission: FeedbackSubmission, now: DateTime<Utc>) -> Self {
        Self {
            id: FeedbackId::generate_at(now),
            email: submission.email,
            feedback: submission.feedback,
            rating: submission.rating,
            created_at: now,
        }
    }
}
