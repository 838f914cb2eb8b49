//! Error types for the reforce-calendar crate.

/// Error type for all fallible operations in the reforce-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month string is not of the form `YYYY-MM`.
    #[error("invalid month '{input}': expected YYYY-MM")]
    InvalidFormat {
        /// The text that failed to parse.
        input: String,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u32,
    },

    /// Returned when a year cannot be represented by the calendar backend.
    #[error("year {year} is out of range")]
    YearOutOfRange {
        /// The offending year.
        year: i32,
    },

    /// Returned when a month range ends before it starts.
    #[error("end month {end} is before start month {start}")]
    ReversedRange {
        /// First month of the range, as `YYYY-MM`.
        start: String,
        /// Last month of the range, as `YYYY-MM`.
        end: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_format() {
        let err = CalendarError::InvalidFormat {
            input: "2020/01".to_string(),
        };
        assert_eq!(err.to_string(), "invalid month '2020/01': expected YYYY-MM");
    }

    #[test]
    fn error_invalid_month() {
        let err = CalendarError::InvalidMonth { month: 13 };
        assert_eq!(err.to_string(), "invalid month: 13 (must be 1..=12)");
    }

    #[test]
    fn error_reversed_range() {
        let err = CalendarError::ReversedRange {
            start: "2020-05".to_string(),
            end: "2020-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "end month 2020-01 is before start month 2020-05"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CalendarError>();
    }
}
