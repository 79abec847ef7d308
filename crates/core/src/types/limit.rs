//! Page size for the featured products listing.

use serde::Serialize;

/// Errors that can occur when building a [`FeaturedLimit`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LimitError {
    /// The input does not start with an integer.
    #[error("limit must be an integer")]
    NotAnInteger,
    /// The value is outside `MIN..=MAX`.
    #[error("limit must be between {min} and {max}", min = FeaturedLimit::MIN, max = FeaturedLimit::MAX)]
    OutOfRange,
}

/// Number of featured products to return.
///
/// ## Constraints
///
/// - Range: 1-100
/// - Default: 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FeaturedLimit(u8);

impl FeaturedLimit {
    /// Smallest accepted limit.
    pub const MIN: u8 = 1;
    /// Largest accepted limit.
    pub const MAX: u8 = 100;
    /// Limit used when the caller does not send one.
    pub const DEFAULT: Self = Self(5);

    /// Create a limit from an integer.
    ///
    /// # Errors
    ///
    /// Returns [`LimitError::OutOfRange`] if `value` is not within `1..=100`.
    pub fn new(value: i64) -> Result<Self, LimitError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(LimitError::OutOfRange)
    }

    /// Parse a limit from a query-string value.
    ///
    /// Reads the leading integer the way query strings are usually read:
    /// leading whitespace and an optional sign, then digits up to the first
    /// non-digit (`"10abc"` and `"10.9"` are both 10).
    ///
    /// # Errors
    ///
    /// Returns [`LimitError::NotAnInteger`] if `s` does not start with an
    /// integer and [`LimitError::OutOfRange`] if the integer is outside `1..=100`.
    pub fn parse(s: &str) -> Result<Self, LimitError> {
        let s = s.trim_start();
        let negative = s.starts_with('-');
        let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);

        let digit_count = unsigned.bytes().take_while(u8::is_ascii_digit).count();
        let digits = unsigned
            .get(..digit_count)
            .filter(|d| !d.is_empty())
            .ok_or(LimitError::NotAnInteger)?;

        // Too many digits for an i64 is still a number, just out of range.
        let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
        Self::new(if negative { -magnitude } else { magnitude })
    }

    /// Returns the limit as a `u8`.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the limit as an `i64`, the type SQL `LIMIT` binds take.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        i64::from(self.0)
    }
}

impl Default for FeaturedLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}
