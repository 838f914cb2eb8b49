//! Inclusive month ranges.

use crate::error::CalendarError;
use crate::month::YearMonth;

/// Every month from `start` to `end`, both included.
///
/// # Errors
///
/// Returns [`CalendarError::ReversedRange`] if `end` is before `start`.
pub fn month_range(start: YearMonth, end: YearMonth) -> Result<Vec<YearMonth>, CalendarError> {
    if end < start {
        return Err(CalendarError::ReversedRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let mut months = Vec::new();
    let mut current = start;
    while current <= end {
        months.push(current);
        current = current.next();
    }
    Ok(months)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn single_month() {
        assert_eq!(
            month_range(ym("2018-06"), ym("2018-06")).unwrap(),
            vec![ym("2018-06")]
        );
    }

    #[test]
    fn across_year_boundary() {
        let months: Vec<String> = month_range(ym("2019-11"), ym("2020-02"))
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(months, ["2019-11", "2019-12", "2020-01", "2020-02"]);
    }

    #[test]
    fn full_decade_length() {
        let months = month_range(ym("2010-01"), ym("2019-12")).unwrap();
        assert_eq!(months.len(), 120);
    }

    #[test]
    fn reversed_rejected() {
        assert_eq!(
            month_range(ym("2020-05"), ym("2020-01")).unwrap_err(),
            CalendarError::ReversedRange {
                start: "2020-05".to_string(),
                end: "2020-01".to_string(),
            }
        );
    }
}
