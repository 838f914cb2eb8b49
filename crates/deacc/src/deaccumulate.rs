//! De-accumulation of gridded fields.

use ndarray::{Array, ArrayView, Dimension};
use reforce_grid::GridField;
use tracing::{debug, warn};

use crate::error::DeaccError;
use crate::variable::AccumulatedVariable;

/// Length of the accumulation window the scalar table assumes, in hours.
const ACCUMULATION_HOURS: f64 = 1.0;

/// Divides every value by the variable's scalar.
pub fn deaccumulate_values<D: Dimension>(
    values: ArrayView<'_, f64, D>,
    variable: AccumulatedVariable,
) -> Array<f64, D> {
    let divisor = variable.divisor();
    values.mapv(|v| v / divisor)
}

/// Inverse of [`deaccumulate_values`]: turns mean rates back into one-hour
/// accumulations.
pub fn accumulate_values<D: Dimension>(
    rates: ArrayView<'_, f64, D>,
    variable: AccumulatedVariable,
) -> Array<f64, D> {
    let divisor = variable.divisor();
    rates.mapv(|v| v * divisor)
}

/// De-accumulates a field of hourly accumulations.
///
/// The returned field is named `deacc_<short name>`, carries the rate units
/// of the scalar table and keeps the input's long name and grid.
///
/// # Errors
///
/// Returns [`DeaccError::TimeAxis`] if the time coordinate has fewer than
/// two samples or is not uniformly spaced. Nothing is computed in that case.
#[tracing::instrument(skip(field), fields(field = field.name()))]
pub fn deaccumulate(
    field: &GridField,
    variable: AccumulatedVariable,
) -> Result<GridField, DeaccError> {
    let step_hours =
        field
            .time()
            .uniform_step_hours()
            .map_err(|source| DeaccError::TimeAxis {
                field: field.name().to_string(),
                source,
            })?;
    if (step_hours - ACCUMULATION_HOURS).abs() > 1e-9 {
        warn!(
            step_hours,
            "time step differs from the one-hour accumulation window"
        );
    }

    let rates = deaccumulate_values(field.data().view(), variable);
    let mut out = field.derive(variable.output_name(), variable.output_units(), rates)?;
    if let Some(long_name) = field.long_name() {
        out = out.with_long_name(long_name);
    }
    debug!(output = out.name(), units = out.units(), "de-accumulated");
    Ok(out)
}
