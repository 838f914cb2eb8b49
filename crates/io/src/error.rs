//! Error types for reforce-io.

use std::path::PathBuf;

use reforce_grid::GridError;

/// Error type for all fallible operations in the reforce-io crate.
///
/// This enum covers netCDF library failures, missing files and variables,
/// unexpected layouts, and grid-model violations encountered while turning
/// file contents into [`reforce_grid::GridField`]s or back.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the netCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying netCDF failure.
        reason: String,
    },

    /// Wraps a filesystem error outside the netCDF library.
    #[error("{action} {}: {source}", path.display())]
    Fs {
        /// What was attempted, e.g. `removing`.
        action: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a variable does not have the expected number of
    /// dimensions.
    #[error("variable '{name}' has {got} dimension(s), expected {expected}")]
    DimensionCount {
        /// Variable name.
        name: String,
        /// Expected number of dimensions.
        expected: usize,
        /// Actual number of dimensions.
        got: usize,
    },

    /// Returned when a time slice index is past the end of the time axis.
    #[error("time index {index} out of range for '{name}' with {len} step(s)")]
    TimeIndexOutOfRange {
        /// Variable name.
        name: String,
        /// Requested index.
        index: usize,
        /// Length of the time dimension.
        len: usize,
    },

    /// Returned when a time coordinate is missing its units or they cannot
    /// be read as text.
    #[error("invalid time coordinate '{name}': {reason}")]
    InvalidTime {
        /// Time variable name.
        name: String,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a reader configuration is unusable.
    #[error("invalid reader configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Wraps a grid-model violation.
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.nc"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.nc");
    }

    #[test]
    fn display_missing_variable() {
        let err = IoError::MissingVariable {
            name: "d2m".to_string(),
            path: PathBuf::from("/data/era5_y2018m01.nc"),
        };
        assert_eq!(
            err.to_string(),
            "variable 'd2m' not found in /data/era5_y2018m01.nc"
        );
    }

    #[test]
    fn display_dimension_count() {
        let err = IoError::DimensionCount {
            name: "sp".to_string(),
            expected: 3,
            got: 4,
        };
        assert_eq!(
            err.to_string(),
            "variable 'sp' has 4 dimension(s), expected 3"
        );
    }

    #[test]
    fn display_time_index() {
        let err = IoError::TimeIndexOutOfRange {
            name: "tp".to_string(),
            index: 744,
            len: 744,
        };
        assert_eq!(
            err.to_string(),
            "time index 744 out of range for 'tp' with 744 step(s)"
        );
    }

    #[test]
    fn display_fs() {
        let err = IoError::Fs {
            action: "removing",
            path: PathBuf::from("/tmp/tmp_era5.nc"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "removing /tmp/tmp_era5.nc: denied");
    }

    #[test]
    fn display_invalid_config() {
        let err = IoError::InvalidConfig {
            reason: "time variable name is empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid reader configuration: time variable name is empty"
        );
    }

    #[test]
    fn from_netcdf_error() {
        let nc_err = netcdf::Error::Str("test nc error".to_string());
        let err: IoError = nc_err.into();
        assert!(matches!(err, IoError::Netcdf { .. }));
        assert!(err.to_string().contains("test nc error"));
    }

    #[test]
    fn from_grid_error_is_transparent() {
        let err: IoError = GridError::TooFewTimeSteps { len: 1 }.into();
        assert_eq!(
            err.to_string(),
            GridError::TooFewTimeSteps { len: 1 }.to_string()
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
