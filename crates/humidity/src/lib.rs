//! # reforce-humidity
//!
//! Near-surface specific humidity from 2 m dew-point temperature and
//! surface pressure.
//!
//! Saturation vapour pressure over liquid water follows the Tetens-type
//! formula of the IFS physics documentation (CY41R2, Part IV, eq. 7.5) and
//! specific humidity follows eq. 7.4. Using the dew point as temperature
//! gives the actual, not saturated, humidity of the air.
//!
//! ```text
//! e_sat = a1 * exp(a3 * (T - T0) / (T - a4))
//! q     = r * e_sat / (p - (1 - r) * e_sat),   r = R_dry / R_vap
//! ```
//!
//! All functions are pure and return the raw IEEE result. At `T == a4` the
//! exponent is `-inf`, so `e_sat` and `q` are `0`; just below `a4` the
//! exponent is `+inf` and `q` is `NaN`. A pressure equal to `(1 - r) * e_sat`
//! gives `inf`. Callers wanting to reject such inputs run [`check_inputs`]
//! first.

pub mod constants;
mod error;
mod estimate;
mod field;
mod validate;

pub use error::HumidityError;
pub use estimate::{
    saturation_vapour_pressure, specific_humidity, specific_humidity_array,
    specific_humidity_into,
};
pub use field::specific_humidity_field;
pub use validate::check_inputs;
