//! Error types for the reforce-grid crate.

/// Error type for all fallible operations in the reforce-grid crate.
///
/// Every variant is a precondition violation: the caller handed over data
/// whose shape, axes or time coordinate break an assumption of the
/// gridded-field model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Returned when a data array does not have the shape its axes imply.
    #[error("shape mismatch for {name}: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Name of the offending field or array.
        name: String,
        /// Shape implied by the axes (or by the other operand).
        expected: Vec<usize>,
        /// Actual shape.
        got: Vec<usize>,
    },

    /// Returned when two fields that must share a coordinate axis do not.
    #[error("{axis} axis differs between '{left}' and '{right}'")]
    AxisMismatch {
        /// Axis name (`time`, `latitude` or `longitude`).
        axis: &'static str,
        /// Name of the first field.
        left: String,
        /// Name of the second field.
        right: String,
    },

    /// Returned when a time axis has too few samples to define a step.
    #[error("time axis has {len} sample(s), at least 2 are needed to define a step")]
    TooFewTimeSteps {
        /// Number of samples on the axis.
        len: usize,
    },

    /// Returned when consecutive time samples are not equally spaced.
    #[error("non-uniform time step: step {index} is {got}, expected {expected}")]
    NonUniformTimeStep {
        /// Index of the first offending difference.
        index: usize,
        /// Step established by the first pair of samples.
        expected: f64,
        /// Offending step.
        got: f64,
    },

    /// Returned when the time axis is not strictly increasing.
    #[error("time axis is not increasing: step {step}")]
    NonIncreasingTime {
        /// The non-positive step.
        step: f64,
    },

    /// Returned when a CF time units string cannot be parsed.
    #[error("invalid time units '{units}': {reason}")]
    InvalidTimeUnits {
        /// The offending units string.
        units: String,
        /// Description of the parse failure.
        reason: String,
    },
}
