//! Physical constants and output metadata.

/// Gas constant for dry air (J kg⁻¹ K⁻¹).
pub const R_DRY: f64 = 287.0597;

/// Gas constant for water vapour (J kg⁻¹ K⁻¹).
pub const R_VAP: f64 = 461.5250;

/// Reference temperature, the triple point of water (K).
pub const T0: f64 = 273.16;

/// Saturation vapour pressure at `T0` (Pa).
pub const A1: f64 = 611.21;

/// Tetens coefficient over liquid water.
pub const A3: f64 = 17.502;

/// Tetens coefficient over liquid water (K).
pub const A4: f64 = 32.19;

/// Ratio of the gas constants, `R_DRY / R_VAP`.
pub const EPSILON: f64 = R_DRY / R_VAP;

/// Variable name of the derived field.
pub const OUTPUT_NAME: &str = "q2";

/// Units attribute of the derived field (a kg/kg mass ratio).
pub const OUTPUT_UNITS: &str = "g/g";

/// Long name of the derived field.
pub const OUTPUT_LONG_NAME: &str = "2 m specific humidity";

/// CF standard name of the derived field.
pub const STANDARD_NAME: &str = "specific_humidity";
