//! Humidity derivation on gridded fields.

use reforce_grid::GridField;
use tracing::debug;

use crate::constants::{OUTPUT_LONG_NAME, OUTPUT_NAME, OUTPUT_UNITS};
use crate::error::HumidityError;
use crate::estimate::specific_humidity_array;

/// Derives the `q2` specific-humidity field from a dew-point field (K) and
/// a surface-pressure field (Pa).
///
/// The result shares the inputs' grid, has units `g/g` and long name
/// `2 m specific humidity`.
///
/// # Errors
///
/// Returns [`HumidityError::Grid`] when the two fields differ in shape or
/// coordinate axes.
#[tracing::instrument(skip_all, fields(dewpoint = dewpoint.name(), pressure = pressure.name()))]
pub fn specific_humidity_field(
    dewpoint: &GridField,
    pressure: &GridField,
) -> Result<GridField, HumidityError> {
    dewpoint.ensure_same_grid(pressure)?;

    let q = specific_humidity_array(dewpoint.data().view(), pressure.data().view())?;
    let non_finite = q.iter().filter(|v| !v.is_finite()).count();
    if non_finite > 0 {
        debug!(non_finite, "humidity contains non-finite values");
    }

    Ok(dewpoint
        .derive(OUTPUT_NAME, OUTPUT_UNITS, q)?
        .with_long_name(OUTPUT_LONG_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use reforce_grid::{GridError, TimeAxis, TimeUnits};

    fn axis(len: usize) -> TimeAxis {
        let units: TimeUnits = "hours since 1900-01-01 00:00:00.0".parse().unwrap();
        TimeAxis::new((0..len).map(|i| i as f64).collect(), units)
    }

    fn field(name: &str, units: &str, value: f64, lats: Vec<f64>) -> GridField {
        let ny = lats.len();
        GridField::new(
            name,
            units,
            Array3::from_elem((3, ny, 2), value),
            axis(3),
            lats,
            vec![0.0, 0.25],
        )
        .unwrap()
    }

    #[test]
    fn derives_q2_metadata() {
        let d2m = field("d2m", "K", 288.0, vec![60.0, 59.0]);
        let sp = field("sp", "Pa", 101_325.0, vec![60.0, 59.0]);
        let q = specific_humidity_field(&d2m, &sp).unwrap();
        assert_eq!(q.name(), "q2");
        assert_eq!(q.units(), "g/g");
        assert_eq!(q.long_name(), Some("2 m specific humidity"));
        assert_eq!(q.shape(), [3, 2, 2]);
        let expected = crate::specific_humidity(288.0, 101_325.0);
        assert!(q.data().iter().all(|&v| v == expected));
    }

    #[test]
    fn rejects_mismatched_grid() {
        let d2m = field("d2m", "K", 288.0, vec![60.0, 59.0]);
        let sp = field("sp", "Pa", 101_325.0, vec![61.0, 59.0]);
        assert_eq!(
            specific_humidity_field(&d2m, &sp).unwrap_err(),
            HumidityError::Grid(GridError::AxisMismatch {
                axis: "latitude",
                left: "d2m".to_string(),
                right: "sp".to_string(),
            })
        );
    }
}
