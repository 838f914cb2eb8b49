//! Error types for the reforce-humidity crate.

use reforce_grid::GridError;

/// Error type for all fallible operations in the reforce-humidity crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HumidityError {
    /// Returned when the operand arrays do not share one shape.
    #[error("{operand} shape {got:?} does not match dew point shape {expected:?}")]
    ShapeMismatch {
        /// Which operand disagrees (`pressure` or `output`).
        operand: &'static str,
        /// Shape of the dew-point array.
        expected: Vec<usize>,
        /// Shape of the offending operand.
        got: Vec<usize>,
    },

    /// Returned by [`check_inputs`](crate::check_inputs) for a point where
    /// the formula is singular or unphysical.
    #[error("non-physical input at {index}: dew point {dewpoint} K, pressure {pressure} Pa ({reason})")]
    NonPhysicalInput {
        /// Array index of the offending point.
        index: String,
        /// Dew-point temperature at that point.
        dewpoint: f64,
        /// Surface pressure at that point.
        pressure: f64,
        /// Which bound was violated.
        reason: &'static str,
    },

    /// Wrapped error from the grid model.
    #[error(transparent)]
    Grid(#[from] GridError),
}
