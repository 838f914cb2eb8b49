//! A calendar month with year context.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// A Gregorian calendar month, e.g. `2020-02`.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month after validating that `month` is in 1..=12 and the
    /// year is representable.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] or
    /// [`CalendarError::YearOutOfRange`].
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(CalendarError::YearOutOfRange { year });
        }
        Ok(Self { year, month })
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u32 {
        self.month
    }

    /// First day of the month.
    pub fn first_day(self) -> NaiveDate {
        // Representability is checked in `new`.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The following month, rolling December over into January.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Number of days in the month, leap years included.
    pub fn days_in_month(self) -> u32 {
        let next = self.next();
        match NaiveDate::from_ymd_opt(next.year, next.month, 1) {
            Some(first_of_next) => first_of_next
                .pred_opt()
                .map_or(31, |last| last.day()),
            None => 31,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidFormat {
            input: s.to_string(),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_display() {
        let m = ym("2018-03");
        assert_eq!(m.year(), 2018);
        assert_eq!(m.month(), 3);
        assert_eq!(m.to_string(), "2018-03");
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["2018", "2018-3", "18-03", "2018/03", "2018-0x", "", "-2018-03"] {
            assert!(
                matches!(
                    bad.parse::<YearMonth>(),
                    Err(CalendarError::InvalidFormat { .. })
                ),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_month_out_of_range() {
        assert_eq!(
            "2018-13".parse::<YearMonth>().unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
        assert_eq!(
            "2018-00".parse::<YearMonth>().unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
    }

    #[test]
    fn next_rolls_over_year() {
        assert_eq!(ym("2019-12").next(), ym("2020-01"));
        assert_eq!(ym("2020-01").next(), ym("2020-02"));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(ym("2020-02").days_in_month(), 29);
        assert_eq!(ym("2019-02").days_in_month(), 28);
        assert_eq!(ym("1900-02").days_in_month(), 28);
        assert_eq!(ym("2000-02").days_in_month(), 29);
        assert_eq!(ym("2021-04").days_in_month(), 30);
        assert_eq!(ym("2021-12").days_in_month(), 31);
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(ym("2019-12") < ym("2020-01"));
        assert!(ym("2020-02") > ym("2020-01"));
    }

    #[test]
    fn first_day() {
        assert_eq!(
            ym("2020-02").first_day(),
            NaiveDate::from_ymd_opt(2020, 2, 1).unwrap()
        );
    }
}
