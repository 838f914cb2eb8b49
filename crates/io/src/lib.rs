//! # reforce-io
//!
//! netCDF reading and writing for `(time, latitude, longitude)` fields.
//! Bridges packed ERA5 files into [`reforce_grid::GridField`]s and writes
//! derived fields back, either into the source file or into a new one.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `reader` | `ReaderConfig`, `read_field`, coordinate lookup with aliases |
//! | `attrs` | Attribute access and CF unpacking |
//! | `normalize` | Rewriting packed files as plain floats |
//! | `dataset` | Append-mode access for adding derived variables |
//! | `writer` | Single-field output files |
//! | `error` | Error types |

mod attrs;
mod dataset;
mod error;
mod normalize;
mod reader;
mod writer;

pub use dataset::Dataset;
pub use error::IoError;
pub use normalize::normalize_to_float;
pub use reader::{ReaderConfig, data_variables, read_field};
pub use writer::write_field_file;
