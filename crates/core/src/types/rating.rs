//! Feedback rating type.

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The input is not a whole number.
    #[error("rating must be a whole number")]
    NotAWholeNumber,
    /// The value is outside `1..=5`.
    #[error("rating must be between {min} and {max}", min = Rating::MIN, max = Rating::MAX)]
    OutOfRange,
}

/// A 1-5 star rating attached to a feedback submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating.
    pub const MIN: u8 = 1;
    /// Highest rating.
    pub const MAX: u8 = 5;

    /// Create a rating from an integer.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] if `value` is not within `1..=5`.
    pub fn new(value: i64) -> Result<Self, RatingError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(RatingError::OutOfRange)
    }

    /// Create a rating from a floating point number, which must be whole.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::NotAWholeNumber`] for fractional, infinite or NaN
    /// input and [`RatingError::OutOfRange`] for whole numbers outside `1..=5`.
    pub fn from_f64(value: f64) -> Result<Self, RatingError> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(RatingError::NotAWholeNumber);
        }
        if value < f64::from(Self::MIN) || value > f64::from(Self::MAX) {
            return Err(RatingError::OutOfRange);
        }
        #[allow(clippy::cast_possible_truncation)] // Range checked above
        let whole = value as i64;
        Self::new(whole)
    }

    /// Parse a rating from text such as `"4"` or `"4.0"`.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::NotAWholeNumber`] if `s` is not numeric.
    pub fn parse(s: &str) -> Result<Self, RatingError> {
        let value = s
            .trim()
            .parse::<f64>()
            .map_err(|_| RatingError::NotAWholeNumber)?;
        Self::from_f64(value)
    }

    /// Returns the rating as a `u8`.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}
