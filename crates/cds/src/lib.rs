//! # reforce-cds
//!
//! Blocking client for the Copernicus Climate Data Store retrieve API.
//!
//! A [`RetrieveRequest`] describes one month of hourly fields. The
//! [`CdsClient`] submits it, polls the resulting task until the archive has
//! produced the file, and streams it to disk. The pipeline only sees the
//! [`Retrieve`] trait, so tests can stand in a local fake.
//!
//! ```ignore
//! use reforce_cds::{Area, CdsClient, ClientConfig, Credentials, GridSpacing, Retrieve, RetrieveRequest};
//!
//! let client = CdsClient::new(Credentials::from_env()?, ClientConfig::default())?;
//! let request = RetrieveRequest::monthly(["2m_temperature"], "2018-01".parse()?)
//!     .with_area(Area::from([66.0, -5.0, 48.0, 31.0]))
//!     .with_grid(GridSpacing::from([0.25, 0.125]));
//! client.retrieve("reanalysis-era5-single-levels", &request, "tmp_era5.nc".as_ref())?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `credentials` | URL and key lookup from the environment or `.cdsapirc` |
//! | `request` | Request body: variables, dates, area, grid |
//! | `client` | Submit, poll, download |
//! | `error` | Error types |

mod client;
mod credentials;
mod error;
mod request;

pub use client::{CdsClient, ClientConfig, Retrieve};
pub use credentials::Credentials;
pub use error::CdsError;
pub use request::{Area, GridSpacing, RetrieveRequest};
