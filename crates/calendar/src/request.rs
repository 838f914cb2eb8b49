//! Day and hour lists in the form archive requests expect.

use crate::month::YearMonth;

/// Zero-padded day numbers of `month`, `"01"` through the last day.
pub fn request_days(month: YearMonth) -> Vec<String> {
    (1..=month.days_in_month())
        .map(|d| format!("{d:02}"))
        .collect()
}

/// All 24 hours of a day, `"00:00"` through `"23:00"`.
pub fn request_hours() -> Vec<String> {
    (0..24).map(|h| format!("{h:02}:00")).collect()
}
