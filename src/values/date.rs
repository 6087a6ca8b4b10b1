//! Date values
//!
//! A date is a millisecond timestamp stored as `f64`. A NaN timestamp marks
//! an invalid date, mirroring the `new Date(NaN)` convention.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Largest magnitude a time value may have (±100,000,000 days from epoch)
const MAX_TIME_VALUE_MS: f64 = 8.64e15;

/// A timestamp container
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateValue {
    millis: f64,
}

impl DateValue {
    /// Create a date from a millisecond timestamp.
    ///
    /// Timestamps beyond the representable range collapse to an invalid date.
    pub fn from_millis(millis: f64) -> Self {
        if millis.is_nan() || millis.abs() > MAX_TIME_VALUE_MS {
            Self::invalid()
        } else {
            Self { millis }
        }
    }

    /// Create an invalid date (NaN timestamp)
    pub fn invalid() -> Self {
        Self { millis: f64::NAN }
    }

    /// Parse an ISO-8601 / RFC 3339 timestamp string
    pub fn parse_iso(text: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|dt| Self::from_millis(dt.timestamp_millis() as f64))
    }

    /// The millisecond timestamp; NaN for invalid dates
    pub fn millis(&self) -> f64 {
        self.millis
    }

    pub fn is_valid(&self) -> bool {
        !self.millis.is_nan()
    }

    /// Whether two dates hold the same instant. Two invalid dates are equal
    /// to each other.
    pub fn same_instant(&self, other: &DateValue) -> bool {
        self.millis == other.millis || (self.millis.is_nan() && other.millis.is_nan())
    }

    /// ISO-8601 rendering, or `None` for invalid dates
    pub fn to_iso_string(&self) -> Option<String> {
        if !self.is_valid() {
            return None;
        }
        DateTime::<Utc>::from_timestamp_millis(self.millis as i64)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format_round_trip() {
        let date = DateValue::parse_iso("2024-01-01T00:00:00.000Z").unwrap();
        assert_eq!(date.millis(), 1704067200000.0);
        assert_eq!(
            date.to_iso_string().as_deref(),
            Some("2024-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_invalid_dates_compare_equal() {
        let a = DateValue::invalid();
        let b = DateValue::from_millis(f64::NAN);
        assert!(!a.is_valid());
        assert!(a.same_instant(&b));
        assert!(a.to_iso_string().is_none());
    }

    #[test]
    fn test_out_of_range_collapses_to_invalid() {
        let date = DateValue::from_millis(1e16);
        assert!(!date.is_valid());
    }
}
