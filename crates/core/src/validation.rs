//! Request validators for the custom routes.
//!
//! Every validator is a pure function from raw request input to a typed value
//! or a [`ValidationError`] naming the offending field. Handlers run them
//! before any service call, so a failure here never touches the database.

use serde::Deserialize;
use serde_json::Value;

use crate::types::{AdminAction, Email, EmailError, FeaturedLimit, LimitError, Rating};

/// A request input failed validation.
///
/// The `Display` output is the message returned to the client.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `limit` is not an integer in `1..=100`.
    #[error("Limit must be between 1 and 100")]
    InvalidLimit(#[source] LimitError),

    /// `action` is absent or empty.
    #[error("Action is required")]
    MissingAction,

    /// `action` is not a known admin action.
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    /// `email` is absent or empty.
    #[error("Email and feedback are required fields")]
    MissingEmail,

    /// `feedback` is absent or empty.
    #[error("Email and feedback are required fields")]
    MissingFeedback,

    /// `email` does not look like `local@domain.tld`.
    #[error("Invalid email format")]
    InvalidEmail,

    /// `rating` is present but not a whole number in `1..=5`.
    #[error("Rating must be a number between 1 and 5")]
    InvalidRating,

    /// The body could not be read as the expected JSON object.
    #[error("Invalid request body")]
    MalformedBody(String),

    /// The query string could not be read (e.g. a repeated parameter).
    #[error("Invalid query parameters")]
    MalformedQuery(String),
}

impl ValidationError {
    /// Name of the input field that failed.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidLimit(_) => "limit",
            Self::MissingAction | Self::UnsupportedAction(_) => "action",
            Self::MissingEmail | Self::InvalidEmail => "email",
            Self::MissingFeedback => "feedback",
            Self::InvalidRating => "rating",
            Self::MalformedBody(_) => "body",
            Self::MalformedQuery(_) => "query",
        }
    }
}

// =============================================================================
// Query Parameters
// =============================================================================

/// Validate the `limit` query parameter.
///
/// The leading integer of the value is used (`"10abc"` is 10). Absent values,
/// and values that do not start with an integer, fall back to
/// [`FeaturedLimit::DEFAULT`].
///
/// # Errors
///
/// Returns [`ValidationError::InvalidLimit`] when the integer is outside
/// `1..=100`.
pub fn featured_limit(raw: Option<&str>) -> Result<FeaturedLimit, ValidationError> {
    let Some(raw) = raw else {
        return Ok(FeaturedLimit::DEFAULT);
    };

    match FeaturedLimit::parse(raw) {
        Err(LimitError::NotAnInteger) => Ok(FeaturedLimit::DEFAULT),
        parsed => parsed.map_err(ValidationError::InvalidLimit),
    }
}

/// Normalize the optional `store_id` query parameter.
///
/// Empty values are treated as absent.
#[must_use]
pub fn store_id(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

// =============================================================================
// Admin Action
// =============================================================================

/// Raw body of an admin action request.
#[derive(Debug, Default, Deserialize)]
pub struct ActionInput {
    #[serde(default)]
    pub action: Option<Value>,
}

/// Validate an admin action request body.
///
/// # Errors
///
/// Returns [`ValidationError::MissingAction`] if `action` is absent, null or
/// empty, and [`ValidationError::UnsupportedAction`] for anything else that is
/// not a known action.
pub fn admin_action(input: &ActionInput) -> Result<AdminAction, ValidationError> {
    match &input.action {
        None | Some(Value::Null) => Err(ValidationError::MissingAction),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::MissingAction),
        Some(Value::String(s)) => s
            .parse()
            .map_err(|_| ValidationError::UnsupportedAction(s.clone())),
        Some(other) => Err(ValidationError::UnsupportedAction(other.to_string())),
    }
}

// =============================================================================
// Feedback
// =============================================================================

/// Raw body of a feedback submission.
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackInput {
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub feedback: Option<Value>,
    #[serde(default)]
    pub rating: Option<Value>,
}

/// A validated feedback submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackSubmission {
    pub email: Email,
    pub feedback: String,
    pub rating: Option<Rating>,
}

/// Validate a feedback submission.
///
/// Checks run in a fixed order: required fields, then email format, then rating.
/// A non-string `email` is a format error; a non-string `feedback` is kept as
/// its JSON text.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn feedback(input: FeedbackInput) -> Result<FeedbackSubmission, ValidationError> {
    let email = required(input.email).ok_or(ValidationError::MissingEmail)?;
    let feedback = required(input.feedback).ok_or(ValidationError::MissingFeedback)?;

    let email = match email {
        Value::String(s) => Email::parse(&s).map_err(|e| match e {
            EmailError::Empty => ValidationError::MissingEmail,
            EmailError::InvalidFormat => ValidationError::InvalidEmail,
        })?,
        _ => return Err(ValidationError::InvalidEmail),
    };
    let feedback = match feedback {
        Value::String(s) => s,
        other => other.to_string(),
    };

    let rating = rating(input.rating.as_ref())?;

    Ok(FeedbackSubmission {
        email,
        feedback,
        rating,
    })
}

/// Drop absent, `null` and empty-string values.
fn required(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null() && v.as_str() != Some(""))
}

/// Validate the optional `rating` field.
///
/// Accepts JSON numbers and numeric strings; `null` counts as absent.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidRating`] unless the value is a whole
/// number in `1..=5`.
pub fn rating(raw: Option<&Value>) -> Result<Option<Rating>, ValidationError> {
    let parsed = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(whole), _) => Rating::new(whole),
            (None, Some(float)) => Rating::from_f64(float),
            (None, None) => return Err(ValidationError::InvalidRating),
        },
        Some(Value::String(s)) => Rating::parse(s),
        Some(_) => return Err(ValidationError::InvalidRating),
    };

    parsed.map(Some).map_err(|_| ValidationError::InvalidRating)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn feedback_input(value: Value) -> FeedbackInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_limit_defaults_to_five() {
        assert_eq!(featured_limit(None).unwrap().get(), 5);
        assert_eq!(featured_limit(Some("")).unwrap().get(), 5);
    }

    #[test]
    fn test_limit_without_digits_defaults_to_five() {
        for raw in ["abc", "  ", "five", ".5"] {
            assert_eq!(featured_limit(Some(raw)).unwrap().get(), 5, "{raw:?}");
        }
    }

    #[test]
    fn test_limit_uses_leading_integer() {
        assert_eq!(featured_limit(Some("10abc")).unwrap().get(), 10);
        assert_eq!(featured_limit(Some("5.5")).unwrap().get(), 5);
        assert_eq!(featured_limit(Some(" 42 ")).unwrap().get(), 42);
    }

    #[test]
    fn test_limit_accepts_full_range() {
        for value in 1..=100 {
            let raw = value.to_string();
            assert_eq!(i64::from(featured_limit(Some(&raw)).unwrap().get()), value);
        }
    }

    #[test]
    fn test_limit_rejects_outside_range() {
        for raw in ["0", "101", "-3", "1000", "0.5", "200abc"] {
            let err = featured_limit(Some(raw)).unwrap_err();
            assert_eq!(err.field(), "limit");
            assert_eq!(err.to_string(), "Limit must be between 1 and 100");
        }
    }

    #[test]
    fn test_malformed_input_messages() {
        let err = ValidationError::MalformedQuery("duplicate field `limit`".to_string());
        assert_eq!(err.to_string(), "Invalid query parameters");
        assert_eq!(err.field(), "query");

        let err = ValidationError::MalformedBody("EOF while parsing".to_string());
        assert_eq!(err.to_string(), "Invalid request body");
        assert_eq!(err.field(), "body");
    }

    #[test]
    fn test_store_id_normalization() {
        assert_eq!(store_id(None), None);
        assert_eq!(store_id(Some("  ")), None);
        assert_eq!(store_id(Some("store_01")), Some("store_01"));
    }

    #[test]
    fn test_action_missing() {
        let input = ActionInput::default();
        assert_eq!(admin_action(&input), Err(ValidationError::MissingAction));

        let input: ActionInput = serde_json::from_value(json!({ "action": "" })).unwrap();
        assert_eq!(admin_action(&input), Err(ValidationError::MissingAction));

        let input: ActionInput = serde_json::from_value(json!({ "action": null })).unwrap();
        assert_eq!(admin_action(&input), Err(ValidationError::MissingAction));
    }

    #[test]
    fn test_action_supported() {
        let input: ActionInput =
            serde_json::from_value(json!({ "action": "generate_report" })).unwrap();
        assert_eq!(admin_action(&input), Ok(AdminAction::GenerateReport));
    }

    #[test]
    fn test_action_unsupported() {
        let input: ActionInput = serde_json::from_value(json!({ "action": "reboot" })).unwrap();
        let err = admin_action(&input).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported action: reboot");
        assert_eq!(err.field(), "action");

        let input: ActionInput = serde_json::from_value(json!({ "action": 7 })).unwrap();
        assert_eq!(
            admin_action(&input),
            Err(ValidationError::UnsupportedAction("7".to_string()))
        );
    }

    #[test]
    fn test_feedback_requires_email_and_feedback() {
        let err = feedback(feedback_input(json!({ "feedback": "Great" }))).unwrap_err();
        assert_eq!(err, ValidationError::MissingEmail);
        assert_eq!(err.to_string(), "Email and feedback are required fields");

        let err = feedback(feedback_input(json!({ "email": "a@b.c", "feedback": "" }))).unwrap_err();
        assert_eq!(err, ValidationError::MissingFeedback);
        assert_eq!(err.to_string(), "Email and feedback are required fields");
    }

    #[test]
    fn test_feedback_email_format() {
        let ok = feedback(feedback_input(json!({ "email": "a@b.c", "feedback": "hi" }))).unwrap();
        assert_eq!(ok.email.as_str(), "a@b.c");
        assert_eq!(ok.rating, None);

        let err = feedback(feedback_input(
            json!({ "email": "not-an-email", "feedback": "hi" }),
        ))
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail);
    }

    #[test]
    fn test_feedback_non_string_email_is_a_format_error() {
        for email in [json!(5), json!(true), json!({ "address": "a@b.c" })] {
            let err = feedback(feedback_input(json!({ "email": email, "feedback": "x" })))
                .unwrap_err();
            assert_eq!(err, ValidationError::InvalidEmail, "email={email}");
        }
    }

    #[test]
    fn test_feedback_non_string_text_is_kept() {
        let ok = feedback(feedback_input(json!({ "email": "a@b.c", "feedback": 42 }))).unwrap();
        assert_eq!(ok.feedback, "42");
    }

    #[test]
    fn test_feedback_null_fields_are_missing() {
        let err = feedback(feedback_input(json!({ "email": null, "feedback": "x" }))).unwrap_err();
        assert_eq!(err, ValidationError::MissingEmail);

        let err = feedback(feedback_input(json!({ "email": "a@b.c", "feedback": null })))
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingFeedback);
    }

    #[test]
    fn test_missing_fields_reported_before_bad_email() {
        let err = feedback(feedback_input(json!({ "email": "nope" }))).unwrap_err();
        assert_eq!(err, ValidationError::MissingFeedback);
    }

    #[test]
    fn test_rating_boundaries() {
        for (value, ok) in [(0, false), (1, true), (3, true), (5, true), (6, false)] {
            let result = rating(Some(&json!(value)));
            assert_eq!(result.is_ok(), ok, "rating {value}");
        }
        assert_eq!(rating(Some(&json!(3))).unwrap().unwrap().get(), 3);
    }

    #[test]
    fn test_rating_shapes() {
        assert_eq!(rating(None).unwrap(), None);
        assert_eq!(rating(Some(&Value::Null)).unwrap(), None);
        assert_eq!(rating(Some(&json!("4"))).unwrap().unwrap().get(), 4);
        assert_eq!(rating(Some(&json!(5.0))).unwrap().unwrap().get(), 5);
        assert_eq!(rating(Some(&json!(2.5))), Err(ValidationError::InvalidRating));
        assert_eq!(rating(Some(&json!("abc"))), Err(ValidationError::InvalidRating));
        assert_eq!(rating(Some(&json!(true))), Err(ValidationError::InvalidRating));
        assert_eq!(rating(Some(&json!([3]))), Err(ValidationError::InvalidRating));
    }

    #[test]
    fn test_rating_checked_after_email() {
        let err = feedback(feedback_input(
            json!({ "email": "bad", "feedback": "hi", "rating": 9 }),
        ))
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail);

        let err = feedback(feedback_input(
            json!({ "email": "a@b.c", "feedback": "hi", "rating": 9 }),
        ))
        .unwrap_err();
        assert_eq!(err.field(), "rating");
    }
}
