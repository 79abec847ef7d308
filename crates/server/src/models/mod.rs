//! Domain models returned by the custom routes.
//!
//! - [`catalog`] - Products and store metadata read from the platform tables
//! - [`admin`] - Entity counts, dashboard statistics, action results
//! - [`feedback`] - Receipt echoed back for a feedback submission

pub mod admin;
pub mod catalog;
pub mod feedback;

pub use admin::{ActionResult, EntityCounts, EntityKind, StatsResult};
pub use catalog::{Product, StoreInfo};
pub use feedback::FeedbackReceipt;

/// Serialize timestamps the way JavaScript's `toISOString()` does
/// (`2024-05-01T12:00:00.000Z`), which is what platform clients parse.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::Serializer;

    /// Format a timestamp as RFC 3339 with millisecond precision and a `Z` suffix.
    #[must_use]
    pub fn format(at: &DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// `serialize_with` adapter for [`format`].
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(at))
    }

    #[cfg(test)]
    #[allow(clippy::unwrap_used)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_uses_millis_and_z() {
            let at = DateTime::from_timestamp_millis(1_714_564_800_123).unwrap();
            assert_eq!(format(&at), "2024-05-01T12:00:00.123Z");
        }
    }
}
