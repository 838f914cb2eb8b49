//! # reforce-deacc
//!
//! Converts ERA5 fields accumulated over the hour ending at each time
//! stamp into mean rates over that hour.
//!
//! | Variable | Stored as | Divisor | Output units |
//! |----------|-----------|---------|--------------|
//! | `ssrd` | J m⁻² per hour | 3600 | `W m-2` |
//! | `strd` | J m⁻² per hour | 3600 | `W m-2` |
//! | `tp` | m of water per hour | 3.6 | `kg m-2 s-1` |
//! | `sf` | m of water equivalent per hour | 3.6 | `kg m-2 s-1` |
//!
//! Metres of water per hour become kg m⁻² s⁻¹ through the density of water
//! (1000 kg m⁻³) and the 3600 s hour, hence the divisor 3.6.
//!
//! The variables form the closed [`AccumulatedVariable`] enumeration; an
//! unknown name fails when it is parsed, before any data is touched.

mod deaccumulate;
mod error;
mod variable;

pub use deaccumulate::{accumulate_values, deaccumulate, deaccumulate_values};
pub use error::DeaccError;
pub use variable::AccumulatedVariable;
