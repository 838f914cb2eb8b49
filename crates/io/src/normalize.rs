//! Rewriting a packed netCDF file with plain floating-point variables.

use std::path::Path;

use netcdf::Extent;
use tracing::{debug, info, warn};

use crate::attrs::{is_copyable_global_attr, is_copyable_var_attr};
use crate::error::IoError;
use crate::reader::{open_file, read_unpacked};

/// Rewrites `input` into `output` with every numeric variable unpacked.
///
/// - Global attributes are copied except reserved `_`-prefixed ones.
/// - Dimensions are copied; `time_dim` (and any dimension that was already
///   unlimited) becomes unlimited.
/// - Data variables are stored as `f32`. Coordinate variables (1-D, named
///   after their dimension) are stored as `f64` so large epoch offsets keep
///   full precision.
/// - Variable attributes are copied except `_`-prefixed ones,
///   `scale_factor`, `add_offset` and `missing_value`.
///
/// Variables that cannot be read as numbers are skipped with a warning.
/// With `remove_source`, `input` is deleted once `output` is complete.
///
/// # Errors
///
/// Returns [`IoError`] if the input cannot be read, the output cannot be
/// written, or the source cannot be removed.
#[tracing::instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn normalize_to_float(
    input: &Path,
    output: &Path,
    time_dim: &str,
    remove_source: bool,
) -> Result<(), IoError> {
    {
        let src = open_file(input)?;
        let mut dst = netcdf::create(output)?;

        for attr in src.attributes() {
            if is_copyable_global_attr(attr.name()) {
                dst.add_attribute(attr.name(), attr.value()?)?;
            }
        }

        for dim in src.dimensions() {
            let name = dim.name();
            if name == time_dim || dim.is_unlimited() {
                dst.add_unlimited_dimension(&name)?;
            } else {
                dst.add_dimension(&name, dim.len())?;
            }
        }

        let mut written = 0usize;
        for var in src.variables() {
            let name = var.name();
            let values = match read_unpacked(&var) {
                Ok(values) => values,
                Err(e) => {
                    warn!(variable = %name, error = %e, "skipping non-numeric variable");
                    continue;
                }
            };

            let dims = var.dimensions();
            let dim_names: Vec<String> = dims.iter().map(|d| d.name()).collect();
            let dim_refs: Vec<&str> = dim_names.iter().map(String::as_str).collect();
            let extents: Vec<Extent> = dims.iter().map(|d| (0..d.len()).into()).collect();
            let is_coordinate = dim_names.len() == 1 && dim_names[0] == name;

            let mut out = if is_coordinate {
                dst.add_variable::<f64>(&name, &dim_refs)?
            } else {
                dst.add_variable::<f32>(&name, &dim_refs)?
            };
            for attr in var.attributes() {
                if is_copyable_var_attr(attr.name()) {
                    out.put_attribute(attr.name(), attr.value()?)?;
                }
            }

            if dims.is_empty() {
                if is_coordinate {
                    out.put_values(&values, ..)?;
                } else {
                    let narrowed: Vec<f32> = values.iter().map(|&v| v as f32).collect();
                    out.put_values(&narrowed, ..)?;
                }
            } else if is_coordinate {
                out.put_values(&values, extents)?;
            } else {
                let narrowed: Vec<f32> = values.iter().map(|&v| v as f32).collect();
                out.put_values(&narrowed, extents)?;
            }
            debug!(variable = %name, coordinate = is_coordinate, "copied");
            written += 1;
        }
        info!(variables = written, "normalized to float");
    }

    if remove_source {
        std::fs::remove_file(input).map_err(|source| IoError::Fs {
            action: "removing",
            path: input.to_path_buf(),
            source,
        })?;
        debug!("removed source file");
    }
    Ok(())
}
