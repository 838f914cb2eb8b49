//! An open netCDF file that new variables are added to in place.

use std::path::{Path, PathBuf};

use ndarray::{Array2, ArrayView2, Axis};
use reforce_grid::{GridError, GridField, TimeAxis};
use tracing::debug;

use crate::error::IoError;
use crate::reader::{
    ReaderConfig, dims3, field_from_file, find_variable, read_slice, read_time_axis,
};

/// A netCDF file opened for appending.
///
/// Reads go through the same unpacking as [`crate::read_field`]. New
/// variables are always stored as `f32` and take their dimensions from an
/// existing template variable, so they share its grid.
pub struct Dataset {
    file: netcdf::FileMut,
    path: PathBuf,
    config: ReaderConfig,
}

impl Dataset {
    /// Opens an existing file for reading and appending.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] if `path` does not exist, or
    /// [`IoError::Netcdf`] if it cannot be opened for writing.
    pub fn open(path: &Path, config: ReaderConfig) -> Result<Self, IoError> {
        config.validate()?;
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = netcdf::append(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
            config,
        })
    }

    /// Path of the open file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a variable of that name exists.
    pub fn has_variable(&self, name: &str) -> bool {
        self.file.variable(name).is_some()
    }

    /// Number of time steps of a 3-D variable.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`] if the variable is missing or not 3-D.
    pub fn time_len(&self, name: &str) -> Result<usize, IoError> {
        let var = find_variable(&self.file, name, &self.path)?;
        Ok(dims3(&var)?[0])
    }

    /// Reads the time coordinate named by the reader configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`] if the coordinate is missing or its units cannot
    /// be parsed.
    pub fn time_axis(&self) -> Result<TimeAxis, IoError> {
        read_time_axis(&self.file, self.config.time_var(), &self.path)
    }

    /// Reads a whole `(time, latitude, longitude)` variable.
    ///
    /// # Errors
    ///
    /// See [`crate::read_field`].
    pub fn read_field(&self, name: &str) -> Result<GridField, IoError> {
        field_from_file(&self.file, &self.path, name, &self.config)
    }

    /// Reads the `(latitude, longitude)` slice at time index `t`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::TimeIndexOutOfRange`] if `t` is past the end.
    pub fn read_time_slice(&self, name: &str, t: usize) -> Result<Array2<f64>, IoError> {
        read_slice(&self.file, &self.path, name, t)
    }

    /// Defines `name` as an `f32` variable with the dimensions of
    /// `template`, or reuses it if it already exists. String attributes in
    /// `attrs` are written in both cases.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingVariable`] if `template` does not exist.
    pub fn define_like(
        &mut self,
        name: &str,
        template: &str,
        attrs: &[(&str, &str)],
    ) -> Result<(), IoError> {
        let dim_names: Vec<String> = find_variable(&self.file, template, &self.path)?
            .dimensions()
            .iter()
            .map(|d| d.name())
            .collect();

        if self.file.variable(name).is_none() {
            let dim_refs: Vec<&str> = dim_names.iter().map(String::as_str).collect();
            self.file.add_variable::<f32>(name, &dim_refs)?;
            debug!(variable = name, template, "defined variable");
        } else {
            debug!(variable = name, "reusing existing variable");
        }

        let mut var = self.variable_mut(name)?;
        for &(key, value) in attrs {
            var.put_attribute(key, value)?;
        }
        Ok(())
    }

    /// Writes one `(latitude, longitude)` slice at time index `t`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`] if the variable is missing or not 3-D, `t` is
    /// past the end of the time axis, or `slice` has the wrong shape.
    pub fn write_time_slice(
        &mut self,
        name: &str,
        t: usize,
        slice: ArrayView2<'_, f64>,
    ) -> Result<(), IoError> {
        let [nt, ny, nx] = dims3(&find_variable(&self.file, name, &self.path)?)?;
        if t >= nt {
            return Err(IoError::TimeIndexOutOfRange {
                name: name.to_string(),
                index: t,
                len: nt,
            });
        }
        if slice.dim() != (ny, nx) {
            return Err(IoError::Grid(GridError::ShapeMismatch {
                name: name.to_string(),
                expected: vec![ny, nx],
                got: slice.shape().to_vec(),
            }));
        }

        let values: Vec<f32> = slice.iter().map(|&v| v as f32).collect();
        self.variable_mut(name)?.put_values(&values, (t, .., ..))?;
        Ok(())
    }

    /// Adds `field` next to `template`, one time slice at a time.
    ///
    /// The variable is named after the field and carries its `units` and
    /// `long_name` plus `attrs`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`] if the template is missing or the field's shape
    /// differs from the template's.
    pub fn write_field(
        &mut self,
        field: &GridField,
        template: &str,
        attrs: &[(&str, &str)],
    ) -> Result<(), IoError> {
        let template_shape = dims3(&find_variable(&self.file, template, &self.path)?)?;
        if field.shape() != template_shape {
            return Err(IoError::Grid(GridError::ShapeMismatch {
                name: field.name().to_string(),
                expected: template_shape.to_vec(),
                got: field.shape().to_vec(),
            }));
        }

        let mut all_attrs: Vec<(&str, &str)> = vec![("units", field.units())];
        if let Some(long_name) = field.long_name() {
            all_attrs.push(("long_name", long_name));
        }
        all_attrs.extend_from_slice(attrs);
        self.define_like(field.name(), template, &all_attrs)?;

        for (t, slice) in field.data().axis_iter(Axis(0)).enumerate() {
            self.write_time_slice(field.name(), t, slice)?;
        }
        debug!(variable = field.name(), template, "wrote field");
        Ok(())
    }

    fn variable_mut(&mut self, name: &str) -> Result<netcdf::VariableMut<'_>, IoError> {
        let path = self.path.clone();
        self.file
            .variable_mut(name)
            .ok_or_else(|| IoError::MissingVariable {
                name: name.to_string(),
                path,
            })
    }
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset")
            .field("path", &self.path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
