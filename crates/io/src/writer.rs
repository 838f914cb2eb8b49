//! Writing a single field to a new netCDF file.

use std::path::Path;

use netcdf::Extent;
use reforce_grid::GridField;
use tracing::info;

use crate::error::IoError;

/// Dimension and coordinate variable names used for new files.
pub(crate) const TIME: &str = "time";
pub(crate) const LATITUDE: &str = "latitude";
pub(crate) const LONGITUDE: &str = "longitude";

/// Writes `field` to a new file at `path`, replacing any existing file.
///
/// The file gets an unlimited `time` dimension and fixed `latitude` and
/// `longitude` dimensions with matching `f64` coordinate variables. The
/// field is stored as `f32` with its `units`, its `long_name` if set, and
/// every pair in `attrs`.
///
/// # Errors
///
/// Returns [`IoError::Netcdf`] if the file cannot be created or written.
#[tracing::instrument(skip(field, attrs), fields(path = %path.display(), field = field.name()))]
pub fn write_field_file(
    path: &Path,
    field: &GridField,
    attrs: &[(&str, &str)],
) -> Result<(), IoError> {
    let [nt, ny, nx] = field.shape();
    let mut file = netcdf::create(path)?;

    file.add_unlimited_dimension(TIME)?;
    file.add_dimension(LATITUDE, ny)?;
    file.add_dimension(LONGITUDE, nx)?;

    {
        let mut var = file.add_variable::<f64>(TIME, &[TIME])?;
        var.put_attribute("standard_name", "time")?;
        var.put_attribute("long_name", "time")?;
        var.put_attribute("units", field.time().units().to_string())?;
        var.put_attribute("calendar", "gregorian")?;
        let extents: Vec<Extent> = vec![(0..nt).into()];
        var.put_values(field.time().values(), extents)?;
    }

    {
        let mut var = file.add_variable::<f64>(LATITUDE, &[LATITUDE])?;
        var.put_attribute("standard_name", "latitude")?;
        var.put_attribute("units", "degrees_north")?;
        var.put_values(field.latitude(), ..)?;
    }

    {
        let mut var = file.add_variable::<f64>(LONGITUDE, &[LONGITUDE])?;
        var.put_attribute("standard_name", "longitude")?;
        var.put_attribute("units", "degrees_east")?;
        var.put_values(field.longitude(), ..)?;
    }

    let mut var = file.add_variable::<f32>(field.name(), &[TIME, LATITUDE, LONGITUDE])?;
    var.put_attribute("units", field.units())?;
    if let Some(long_name) = field.long_name() {
        var.put_attribute("long_name", long_name)?;
    }
    for &(key, value) in attrs {
        var.put_attribute(key, value)?;
    }
    let values: Vec<f32> = field.data().iter().map(|&v| v as f32).collect();
    let extents: Vec<Extent> = vec![(0..nt).into(), (0..ny).into(), (0..nx).into()];
    var.put_values(&values, extents)?;

    info!(nt, ny, nx, "wrote field");
    Ok(())
}
