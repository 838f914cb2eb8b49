//! Error types for the reforce-deacc crate.

use reforce_grid::GridError;

/// Error type for all fallible operations in the reforce-deacc crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeaccError {
    /// Returned when a name does not identify an accumulated variable.
    #[error("no de-accumulation scalar defined for '{name}'")]
    UnknownVariable {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when the time axis does not have a uniform step.
    #[error("cannot de-accumulate '{field}': {source}")]
    TimeAxis {
        /// Name of the field being processed.
        field: String,
        /// Underlying time-axis violation.
        #[source]
        source: GridError,
    },

    /// Wrapped error from the grid model.
    #[error(transparent)]
    Grid(#[from] GridError),
}
