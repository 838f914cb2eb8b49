//! Optional physical-bounds check for humidity inputs.

use ndarray::{ArrayView, Dimension};

use crate::constants::{A4, EPSILON};
use crate::error::HumidityError;
use crate::estimate::{ensure_shape, saturation_vapour_pressure};

/// Rejects inputs for which the humidity formula is singular or
/// unphysical.
///
/// A point fails when either value is not finite, when the dew point is at
/// or below `a4` (the denominator of the exponent vanishes or flips sign),
/// or when the pressure does not exceed `(1 - r) * e_sat`.
///
/// # Errors
///
/// Returns [`HumidityError::ShapeMismatch`] for unequal shapes, otherwise
/// [`HumidityError::NonPhysicalInput`] for the first offending point in
/// row-major order.
pub fn check_inputs<D: Dimension>(
    dewpoint: ArrayView<'_, f64, D>,
    pressure: ArrayView<'_, f64, D>,
) -> Result<(), HumidityError>
where
    D::Pattern: std::fmt::Debug,
{
    ensure_shape("pressure", dewpoint.shape(), pressure.shape())?;

    for ((index, &t), &p) in dewpoint.indexed_iter().zip(pressure.iter()) {
        let reason = if !t.is_finite() || !p.is_finite() {
            Some("non-finite value")
        } else if t <= A4 {
            Some("dew point at or below a4")
        } else if p <= (1.0 - EPSILON) * saturation_vapour_pressure(t) {
            Some("pressure does not exceed vapour pressure term")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(HumidityError::NonPhysicalInput {
                index: format!("{index:?}"),
                dewpoint: t,
                pressure: p,
                reason,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn realistic_inputs_pass() {
        let t = array![[250.0, 273.15], [290.0, 305.0]];
        let p = array![[90_000.0, 95_000.0], [101_325.0, 105_000.0]];
        assert!(check_inputs(t.view(), p.view()).is_ok());
    }

    #[test]
    fn singular_dewpoint_rejected() {
        let t = array![[280.0, A4]];
        let p = array![[100_000.0, 100_000.0]];
        match check_inputs(t.view(), p.view()).unwrap_err() {
            HumidityError::NonPhysicalInput { index, reason, .. } => {
                assert_eq!(index, "(0, 1)");
                assert_eq!(reason, "dew point at or below a4");
            }
            other => panic!("expected NonPhysicalInput, got {other:?}"),
        }
    }

    #[test]
    fn low_pressure_rejected() {
        let t = array![300.0];
        let p = array![1_000.0];
        assert!(matches!(
            check_inputs(t.view(), p.view()),
            Err(HumidityError::NonPhysicalInput {
                reason: "pressure does not exceed vapour pressure term",
                ..
            })
        ));
    }

    #[test]
    fn nan_rejected() {
        let t = array![280.0, 281.0];
        let p = array![100_000.0, f64::NAN];
        assert!(matches!(
            check_inputs(t.view(), p.view()),
            Err(HumidityError::NonPhysicalInput {
                reason: "non-finite value",
                ..
            })
        ));
    }

    #[test]
    fn shape_checked_first() {
        let t = array![280.0];
        let p = array![100_000.0, 100_000.0];
        assert!(matches!(
            check_inputs(t.view(), p.view()),
            Err(HumidityError::ShapeMismatch { .. })
        ));
    }
}
