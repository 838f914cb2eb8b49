//! CF time units and time axes.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::GridError;

/// Relative tolerance used when comparing consecutive time steps.
const STEP_RTOL: f64 = 1e-5;
/// Absolute tolerance used when comparing consecutive time steps.
const STEP_ATOL: f64 = 1e-8;

/// Unit of a CF time offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// SI seconds.
    Seconds,
    /// Minutes.
    Minutes,
    /// Hours.
    Hours,
    /// Days of 24 hours.
    Days,
}

impl TimeUnit {
    /// Number of seconds in one unit.
    pub fn seconds(self) -> f64 {
        match self {
            Self::Seconds => 1.0,
            Self::Minutes => 60.0,
            Self::Hours => 3600.0,
            Self::Days => 86_400.0,
        }
    }

    /// Number of hours in one unit.
    pub fn hours(self) -> f64 {
        self.seconds() / 3600.0
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
        }
    }
}

/// Parsed CF units of a time coordinate, e.g. `hours since 1900-01-01 00:00:00.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnits {
    unit: TimeUnit,
    epoch: NaiveDateTime,
}

impl TimeUnits {
    /// Creates time units from an explicit unit and reference epoch.
    pub fn new(unit: TimeUnit, epoch: NaiveDateTime) -> Self {
        Self { unit, epoch }
    }

    /// Hours since the given epoch.
    pub fn hours_since(epoch: NaiveDateTime) -> Self {
        Self::new(TimeUnit::Hours, epoch)
    }

    /// Returns the offset unit.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Returns the reference epoch.
    pub fn epoch(&self) -> NaiveDateTime {
        self.epoch
    }
}

impl fmt::Display for TimeUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} since {}",
            self.unit.as_str(),
            self.epoch.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

impl FromStr for TimeUnits {
    type Err = GridError;

    /// Parses `"<unit> since YYYY-MM-DD[ HH:MM[:SS[.f]]]"`.
    ///
    /// A `T` separator between date and time is accepted, fractional
    /// seconds are dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| GridError::InvalidTimeUnits {
            units: s.to_string(),
            reason,
        };

        let parts: Vec<&str> = s.trim().splitn(3, ' ').collect();
        if parts.len() < 3 || parts[1] != "since" {
            return Err(invalid("expected '<unit> since <epoch>'".to_string()));
        }

        let unit = match parts[0].to_ascii_lowercase().as_str() {
            "second" | "seconds" | "s" => TimeUnit::Seconds,
            "minute" | "minutes" | "min" => TimeUnit::Minutes,
            "hour" | "hours" | "h" => TimeUnit::Hours,
            "day" | "days" | "d" => TimeUnit::Days,
            other => return Err(invalid(format!("unsupported unit '{other}'"))),
        };

        let stamp = parts[2].trim().replacen('T', " ", 1);
        let (date_str, time_str) = match stamp.split_once(' ') {
            Some((d, t)) => (d, t.trim()),
            None => (stamp.as_str(), ""),
        };

        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|e| invalid(format!("bad epoch date '{date_str}': {e}")))?;

        let time = if time_str.is_empty() {
            NaiveTime::MIN
        } else {
            let whole = time_str.split('.').next().unwrap_or(time_str);
            NaiveTime::parse_from_str(whole, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(whole, "%H:%M"))
                .map_err(|e| invalid(format!("bad epoch time '{time_str}': {e}")))?
        };

        Ok(Self::new(unit, date.and_time(time)))
    }
}

/// A monotonic time coordinate: numeric offsets from an epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    values: Vec<f64>,
    units: TimeUnits,
}

impl TimeAxis {
    /// Creates a time axis from raw offsets and their units.
    pub fn new(values: Vec<f64>, units: TimeUnits) -> Self {
        Self { values, units }
    }

    /// Hourly axis with `len` samples starting at `start` hours after `epoch`.
    pub fn hourly(epoch: NaiveDateTime, start: f64, len: usize) -> Self {
        let values = (0..len).map(|i| start + i as f64).collect();
        Self::new(values, TimeUnits::hours_since(epoch))
    }

    /// Raw offsets in the axis unit.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Units of the offsets.
    pub fn units(&self) -> &TimeUnits {
        &self.units
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the axis has no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the constant spacing between consecutive samples, in the
    /// axis unit.
    ///
    /// Steps are compared against the first one with a relative tolerance
    /// of `1e-5` and an absolute tolerance of `1e-8`.
    ///
    /// # Errors
    ///
    /// - [`GridError::TooFewTimeSteps`] for fewer than two samples.
    /// - [`GridError::NonIncreasingTime`] if the first step is not positive.
    /// - [`GridError::NonUniformTimeStep`] at the first deviating step.
    pub fn uniform_step(&self) -> Result<f64, GridError> {
        if self.values.len() < 2 {
            return Err(GridError::TooFewTimeSteps {
                len: self.values.len(),
            });
        }

        let first = self.values[1] - self.values[0];
        if first.is_nan() || first <= 0.0 {
            return Err(GridError::NonIncreasingTime { step: first });
        }

        for (index, pair) in self.values.windows(2).enumerate().skip(1) {
            let step = pair[1] - pair[0];
            let close = (step - first).abs() <= STEP_ATOL + STEP_RTOL * first.abs();
            if !close {
                return Err(GridError::NonUniformTimeStep {
                    index,
                    expected: first,
                    got: step,
                });
            }
        }

        Ok(first)
    }

    /// Uniform step converted to hours.
    ///
    /// # Errors
    ///
    /// Same as [`uniform_step`](Self::uniform_step).
    pub fn uniform_step_hours(&self) -> Result<f64, GridError> {
        Ok(self.uniform_step()? * self.units.unit.hours())
    }

    /// Calendar timestamp of sample `index`, or `None` if the index is out
    /// of range or the offset overflows.
    pub fn datetime_at(&self, index: usize) -> Option<NaiveDateTime> {
        let offset = *self.values.get(index)?;
        let millis = offset * self.units.unit.seconds() * 1000.0;
        if !millis.is_finite() {
            return None;
        }
        let delta = TimeDelta::try_milliseconds(millis.round() as i64)?;
        self.units.epoch.checked_add_signed(delta)
    }
}
