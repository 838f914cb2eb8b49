//! Reading gridded fields from netCDF files.

use std::path::Path;

use ndarray::{Array2, Array3};
use reforce_grid::{GridError, GridField, TimeAxis, TimeUnits};
use tracing::debug;

use crate::attrs::{Packing, attr_string};
use crate::error::IoError;

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Names of the coordinate variables of a `(time, latitude, longitude)`
/// file.
///
/// The [`Default`] implementation matches ERA5 netCDF output; the short
/// `lat`/`lon` spellings are accepted as fallbacks.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Name of the time coordinate variable.
    time_var: String,
    /// Aliases to try, in order, for the latitude coordinate.
    lat_aliases: Vec<String>,
    /// Aliases to try, in order, for the longitude coordinate.
    lon_aliases: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            time_var: "time".into(),
            lat_aliases: vec!["latitude".into(), "lat".into()],
            lon_aliases: vec!["longitude".into(), "lon".into()],
        }
    }
}

impl ReaderConfig {
    /// Set the time coordinate name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Replace the latitude aliases.
    pub fn with_lat_aliases<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        self.lat_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the longitude aliases.
    pub fn with_lon_aliases<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        self.lon_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Name of the time coordinate variable.
    pub fn time_var(&self) -> &str {
        &self.time_var
    }

    /// Validate that every coordinate has a name to look for.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidConfig`] for an empty time name or alias
    /// list.
    pub fn validate(&self) -> Result<(), IoError> {
        if self.time_var.is_empty() {
            return Err(IoError::InvalidConfig {
                reason: "time variable name is empty".to_string(),
            });
        }
        if self.lat_aliases.is_empty() || self.lon_aliases.is_empty() {
            return Err(IoError::InvalidConfig {
                reason: "latitude and longitude need at least one alias each".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Low-level helpers shared with `Dataset`
// ---------------------------------------------------------------------------

/// Open a netCDF file, returning [`IoError::FileNotFound`] if the path does
/// not exist.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

pub(crate) fn find_variable<'f>(
    file: &'f netcdf::File,
    name: &str,
    path: &Path,
) -> Result<netcdf::Variable<'f>, IoError> {
    file.variable(name).ok_or_else(|| IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a 1-D coordinate, trying each alias in order.
fn read_coordinate(
    file: &netcdf::File,
    aliases: &[String],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().map_or("unknown", String::as_str);
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read the time coordinate and its CF units.
pub(crate) fn read_time_axis(
    file: &netcdf::File,
    name: &str,
    path: &Path,
) -> Result<TimeAxis, IoError> {
    let var = find_variable(file, name, path)?;
    let units = attr_string(&var, "units").ok_or_else(|| IoError::InvalidTime {
        name: name.to_string(),
        reason: "missing or non-text 'units' attribute".to_string(),
    })?;
    let units: TimeUnits = units.parse()?;
    let values = var.get_values::<f64, _>(..)?;
    Ok(TimeAxis::new(values, units))
}

/// Read every value of `var`, unpacked to physical units.
pub(crate) fn read_unpacked(var: &netcdf::Variable<'_>) -> Result<Vec<f64>, IoError> {
    let mut values = var.get_values::<f64, _>(..)?;
    Packing::of(var).unpack(&mut values);
    Ok(values)
}

/// Check that `var` is 3-D and return its dimension lengths.
pub(crate) fn dims3(var: &netcdf::Variable<'_>) -> Result<[usize; 3], IoError> {
    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(IoError::DimensionCount {
            name: var.name(),
            expected: 3,
            got: dims.len(),
        });
    }
    Ok([dims[0].len(), dims[1].len(), dims[2].len()])
}

/// Read one `(latitude, longitude)` slice at time index `t`, unpacked.
pub(crate) fn read_slice(
    file: &netcdf::File,
    path: &Path,
    name: &str,
    t: usize,
) -> Result<Array2<f64>, IoError> {
    let var = find_variable(file, name, path)?;
    let [nt, ny, nx] = dims3(&var)?;
    if t >= nt {
        return Err(IoError::TimeIndexOutOfRange {
            name: name.to_string(),
            index: t,
            len: nt,
        });
    }

    let mut values = var.get_values::<f64, _>((t, .., ..))?;
    Packing::of(&var).unpack(&mut values);
    let got = values.len();
    Array2::from_shape_vec((ny, nx), values).map_err(|_| {
        IoError::Grid(GridError::ShapeMismatch {
            name: name.to_string(),
            expected: vec![ny, nx],
            got: vec![got],
        })
    })
}

pub(crate) fn field_from_file(
    file: &netcdf::File,
    path: &Path,
    name: &str,
    config: &ReaderConfig,
) -> Result<GridField, IoError> {
    let var = find_variable(file, name, path)?;
    let [nt, ny, nx] = dims3(&var)?;

    let time = read_time_axis(file, &config.time_var, path)?;
    let latitude = read_coordinate(file, &config.lat_aliases, path)?;
    let longitude = read_coordinate(file, &config.lon_aliases, path)?;

    let values = read_unpacked(&var)?;
    let got = values.len();
    let data = Array3::from_shape_vec((nt, ny, nx), values).map_err(|_| {
        IoError::Grid(GridError::ShapeMismatch {
            name: name.to_string(),
            expected: vec![nt, ny, nx],
            got: vec![got],
        })
    })?;

    let units = attr_string(&var, "units").unwrap_or_default();
    let mut field = GridField::new(name, units, data, time, latitude, longitude)?;
    if let Some(long_name) = attr_string(&var, "long_name") {
        field = field.with_long_name(long_name);
    }
    debug!(variable = name, nt, ny, nx, "read field");
    Ok(field)
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Read a `(time, latitude, longitude)` variable with its coordinates.
///
/// Packed values are unpacked with `scale_factor`/`add_offset`, and
/// `_FillValue`/`missing_value` become NaN.
///
/// # Errors
///
/// Returns [`IoError`] if the file or any variable is missing, the variable
/// is not 3-D, the time units cannot be parsed, or the coordinates do not
/// match the data shape.
#[tracing::instrument(skip(config), fields(path = %path.display()))]
pub fn read_field(path: &Path, variable: &str, config: &ReaderConfig) -> Result<GridField, IoError> {
    config.validate()?;
    let file = open_file(path)?;
    field_from_file(&file, path, variable, config)
}

/// Names of every 3-D variable in the file, in file order.
///
/// # Errors
///
/// Returns [`IoError`] if the file cannot be opened.
pub fn data_variables(path: &Path) -> Result<Vec<String>, IoError> {
    let file = open_file(path)?;
    Ok(file
        .variables()
        .filter(|v| v.dimensions().len() == 3)
        .map(|v| v.name())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_era5() {
        let config = ReaderConfig::default();
        assert_eq!(config.time_var(), "time");
        assert_eq!(config.lat_aliases, ["latitude", "lat"]);
        assert_eq!(config.lon_aliases, ["longitude", "lon"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builders_replace_names() {
        let config = ReaderConfig::default()
            .with_time_var("valid_time")
            .with_lat_aliases(["y"])
            .with_lon_aliases(vec!["x".to_string()]);
        assert_eq!(config.time_var(), "valid_time");
        assert_eq!(config.lat_aliases, ["y"]);
        assert_eq!(config.lon_aliases, ["x"]);
    }

    #[test]
    fn validate_rejects_empty_names() {
        assert!(matches!(
            ReaderConfig::default().with_time_var("").validate(),
            Err(IoError::InvalidConfig { .. })
        ));
        let no_lat: Vec<String> = Vec::new();
        assert!(matches!(
            ReaderConfig::default().with_lat_aliases(no_lat).validate(),
            Err(IoError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn missing_file() {
        let err = read_field(
            Path::new("/tmp/reforce_test_nonexistent.nc"),
            "d2m",
            &ReaderConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
