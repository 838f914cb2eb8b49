//! Gridded `(time, latitude, longitude)` fields.

use ndarray::Array3;

use crate::error::GridError;
use crate::time::TimeAxis;

/// A named 3-D field on a regular latitude/longitude grid.
///
/// The data array is indexed `[time, latitude, longitude]`. Construction
/// validates that the axis lengths match the data shape, so every
/// `GridField` in circulation is internally consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct GridField {
    name: String,
    units: String,
    long_name: Option<String>,
    data: Array3<f64>,
    time: TimeAxis,
    latitude: Vec<f64>,
    longitude: Vec<f64>,
}

impl GridField {
    /// Creates a field after checking that `data` has shape
    /// `[time.len(), latitude.len(), longitude.len()]`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] when the shape disagrees with
    /// the axes.
    pub fn new(
        name: impl Into<String>,
        units: impl Into<String>,
        data: Array3<f64>,
        time: TimeAxis,
        latitude: Vec<f64>,
        longitude: Vec<f64>,
    ) -> Result<Self, GridError> {
        let name = name.into();
        let expected = [time.len(), latitude.len(), longitude.len()];
        if data.shape() != expected {
            return Err(GridError::ShapeMismatch {
                name,
                expected: expected.to_vec(),
                got: data.shape().to_vec(),
            });
        }

        Ok(Self {
            name,
            units: units.into(),
            long_name: None,
            data,
            time,
            latitude,
            longitude,
        })
    }

    /// Sets the descriptive long name.
    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = Some(long_name.into());
        self
    }

    /// Builds a new field on the same grid from `data`.
    ///
    /// The long name is not carried over.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] if `data` has a different shape.
    pub fn derive(
        &self,
        name: impl Into<String>,
        units: impl Into<String>,
        data: Array3<f64>,
    ) -> Result<Self, GridError> {
        Self::new(
            name,
            units,
            data,
            self.time.clone(),
            self.latitude.clone(),
            self.longitude.clone(),
        )
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units string as stored in the file, e.g. `J m**-2`.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Descriptive long name, if any.
    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref()
    }

    /// The `[time, latitude, longitude]` data.
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// Consumes the field and returns its data.
    pub fn into_data(self) -> Array3<f64> {
        self.data
    }

    /// Time coordinate.
    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    /// Latitude coordinate in degrees north.
    pub fn latitude(&self) -> &[f64] {
        &self.latitude
    }

    /// Longitude coordinate in degrees east.
    pub fn longitude(&self) -> &[f64] {
        &self.longitude
    }

    /// Shape as `[n_time, n_lat, n_lon]`.
    pub fn shape(&self) -> [usize; 3] {
        let (nt, ny, nx) = self.data.dim();
        [nt, ny, nx]
    }

    /// Checks that `other` lives on exactly the same grid: identical shape,
    /// time axis, latitudes and longitudes.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] or [`GridError::AxisMismatch`]
    /// for the first difference found.
    pub fn ensure_same_grid(&self, other: &GridField) -> Result<(), GridError> {
        if self.shape() != other.shape() {
            return Err(GridError::ShapeMismatch {
                name: other.name.clone(),
                expected: self.shape().to_vec(),
                got: other.shape().to_vec(),
            });
        }

        let axis_mismatch = |axis| GridError::AxisMismatch {
            axis,
            left: self.name.clone(),
            right: other.name.clone(),
        };

        if self.time != other.time {
            return Err(axis_mismatch("time"));
        }
        if self.latitude != other.latitude {
            return Err(axis_mismatch("latitude"));
        }
        if self.longitude != other.longitude {
            return Err(axis_mismatch("longitude"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn axis(len: usize) -> TimeAxis {
        let epoch = NaiveDate::from_ymd_opt(1900, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        TimeAxis::hourly(epoch, 0.0, len)
    }

    fn field(name: &str, nt: usize, ny: usize, nx: usize) -> GridField {
        let lat = (0..ny).map(|j| 66.0 - j as f64 * 0.1125).collect();
        let lon = (0..nx).map(|i| -5.0 + i as f64 * 0.25).collect();
        GridField::new(name, "K", Array3::zeros((nt, ny, nx)), axis(nt), lat, lon).unwrap()
    }

    #[test]
    fn new_validates_shape() {
        let err = GridField::new(
            "t2m",
            "K",
            Array3::zeros((2, 3, 4)),
            axis(2),
            vec![0.0; 3],
            vec![0.0; 5],
        )
        .unwrap_err();
        assert_eq!(
            err,
            GridError::ShapeMismatch {
                name: "t2m".to_string(),
                expected: vec![2, 3, 5],
                got: vec![2, 3, 4],
            }
        );
    }

    #[test]
    fn accessors() {
        let f = field("d2m", 4, 2, 3).with_long_name("2 metre dewpoint temperature");
        assert_eq!(f.name(), "d2m");
        assert_eq!(f.units(), "K");
        assert_eq!(f.long_name(), Some("2 metre dewpoint temperature"));
        assert_eq!(f.shape(), [4, 2, 3]);
        assert_eq!(f.time().len(), 4);
        assert_eq!(f.latitude().len(), 2);
        assert_eq!(f.longitude().len(), 3);
    }

    #[test]
    fn derive_keeps_grid_and_drops_long_name() {
        let f = field("ssrd", 2, 2, 2).with_long_name("solar");
        let d = f
            .derive("deacc_ssrd", "W m-2", Array3::from_elem((2, 2, 2), 1.0))
            .unwrap();
        assert_eq!(d.name(), "deacc_ssrd");
        assert_eq!(d.long_name(), None);
        assert!(f.ensure_same_grid(&d).is_ok());
    }

    #[test]
    fn derive_rejects_other_shape() {
        let f = field("ssrd", 2, 2, 2);
        assert!(f.derive("x", "1", Array3::zeros((2, 2, 3))).is_err());
    }

    #[test]
    fn same_grid_detects_shape() {
        let a = field("d2m", 2, 2, 2);
        let b = field("sp", 3, 2, 2);
        assert!(matches!(
            a.ensure_same_grid(&b),
            Err(GridError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn same_grid_detects_axes() {
        let a = field("d2m", 2, 2, 2);
        let shifted = GridField::new(
            "sp",
            "Pa",
            Array3::zeros((2, 2, 2)),
            axis(2),
            vec![10.0, 20.0],
            a.longitude().to_vec(),
        )
        .unwrap();
        assert_eq!(
            a.ensure_same_grid(&shifted).unwrap_err(),
            GridError::AxisMismatch {
                axis: "latitude",
                left: "d2m".to_string(),
                right: "sp".to_string(),
            }
        );
    }
}
