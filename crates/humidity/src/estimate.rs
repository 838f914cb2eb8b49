//! Pointwise and array evaluation of the humidity formula.

use ndarray::{Array, ArrayView, ArrayViewMut, Dimension, Zip};

use crate::constants::{A1, A3, A4, EPSILON, T0};
use crate::error::HumidityError;

/// Saturation vapour pressure over liquid water (Pa) at temperature `t` (K).
pub fn saturation_vapour_pressure(t: f64) -> f64 {
    A1 * (A3 * (t - T0) / (t - A4)).exp()
}

/// Specific humidity (kg/kg) from dew-point temperature `t` (K) and
/// surface pressure `p` (Pa).
///
/// No validation is performed. A dew point of exactly `a4` gives `0`, one
/// just below it gives `NaN`, and a pressure of `(1 - r) * e_sat` gives
/// `inf`.
pub fn specific_humidity(t: f64, p: f64) -> f64 {
    let e_sat = saturation_vapour_pressure(t);
    EPSILON * e_sat / (p - (1.0 - EPSILON) * e_sat)
}

/// Elementwise [`specific_humidity`] over two equally shaped arrays.
///
/// # Errors
///
/// Returns [`HumidityError::ShapeMismatch`] if the shapes differ. No
/// broadcasting is attempted.
pub fn specific_humidity_array<D: Dimension>(
    dewpoint: ArrayView<'_, f64, D>,
    pressure: ArrayView<'_, f64, D>,
) -> Result<Array<f64, D>, HumidityError> {
    ensure_shape("pressure", dewpoint.shape(), pressure.shape())?;
    Ok(Zip::from(dewpoint)
        .and(pressure)
        .map_collect(|&t, &p| specific_humidity(t, p)))
}

/// Elementwise [`specific_humidity`] written into `out`.
///
/// Lets callers reuse one buffer across time steps.
///
/// # Errors
///
/// Returns [`HumidityError::ShapeMismatch`] if `pressure` or `out` differ
/// in shape from `dewpoint`. `out` is untouched in that case.
pub fn specific_humidity_into<D: Dimension>(
    dewpoint: ArrayView<'_, f64, D>,
    pressure: ArrayView<'_, f64, D>,
    out: ArrayViewMut<'_, f64, D>,
) -> Result<(), HumidityError> {
    ensure_shape("pressure", dewpoint.shape(), pressure.shape())?;
    ensure_shape("output", dewpoint.shape(), out.shape())?;
    Zip::from(out)
        .and(dewpoint)
        .and(pressure)
        .for_each(|q, &t, &p| *q = specific_humidity(t, p));
    Ok(())
}

pub(crate) fn ensure_shape(
    operand: &'static str,
    expected: &[usize],
    got: &[usize],
) -> Result<(), HumidityError> {
    if expected != got {
        return Err(HumidityError::ShapeMismatch {
            operand,
            expected: expected.to_vec(),
            got: got.to_vec(),
        });
    }
    Ok(())
}
