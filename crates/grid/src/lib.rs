//! # reforce-grid
//!
//! In-memory representation of gridded reanalysis fields.
//!
//! A [`GridField`] is a 3-D array indexed by `(time, latitude, longitude)`
//! together with its coordinate axes and units. Fields carry no file-format
//! or network dependency; reading and writing live in `reforce-io`.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `time` | CF time units and the time axis with its uniform-step check |
//! | `field` | The gridded field and axis compatibility checks |
//! | `error` | Error types |

mod error;
mod field;
mod time;

pub use error::GridError;
pub use field::GridField;
pub use time::{TimeAxis, TimeUnit, TimeUnits};
