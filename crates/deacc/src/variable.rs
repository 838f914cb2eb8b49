//! The closed set of accumulated ERA5 variables and their scalars.

use std::fmt;
use std::str::FromStr;

use crate::error::DeaccError;

/// An ERA5 single-level variable stored as a one-hour accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccumulatedVariable {
    /// Surface solar radiation downwards (`ssrd`).
    SurfaceSolarRadiationDownwards,
    /// Surface thermal radiation downwards (`strd`).
    SurfaceThermalRadiationDownwards,
    /// Total precipitation (`tp`).
    TotalPrecipitation,
    /// Snowfall (`sf`).
    Snowfall,
}

impl AccumulatedVariable {
    /// Every accumulated variable, in table order.
    pub const ALL: [Self; 4] = [
        Self::SurfaceSolarRadiationDownwards,
        Self::SurfaceThermalRadiationDownwards,
        Self::TotalPrecipitation,
        Self::Snowfall,
    ];

    /// Short name used for the netCDF variable, e.g. `ssrd`.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::SurfaceSolarRadiationDownwards => "ssrd",
            Self::SurfaceThermalRadiationDownwards => "strd",
            Self::TotalPrecipitation => "tp",
            Self::Snowfall => "sf",
        }
    }

    /// Long name used in archive requests, e.g.
    /// `surface_solar_radiation_downwards`.
    pub fn request_name(self) -> &'static str {
        match self {
            Self::SurfaceSolarRadiationDownwards => "surface_solar_radiation_downwards",
            Self::SurfaceThermalRadiationDownwards => "surface_thermal_radiation_downwards",
            Self::TotalPrecipitation => "total_precipitation",
            Self::Snowfall => "snowfall",
        }
    }

    /// Value the one-hour accumulation is divided by.
    pub fn divisor(self) -> f64 {
        match self {
            Self::SurfaceSolarRadiationDownwards | Self::SurfaceThermalRadiationDownwards => {
                3600.0
            }
            Self::TotalPrecipitation | Self::Snowfall => 3.6,
        }
    }

    /// Units of the de-accumulated rate.
    pub fn output_units(self) -> &'static str {
        match self {
            Self::SurfaceSolarRadiationDownwards | Self::SurfaceThermalRadiationDownwards => {
                "W m-2"
            }
            Self::TotalPrecipitation | Self::Snowfall => "kg m-2 s-1",
        }
    }

    /// Name of the de-accumulated variable, `deacc_<short name>`.
    pub fn output_name(self) -> String {
        format!("deacc_{}", self.short_name())
    }
}

impl fmt::Display for AccumulatedVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for AccumulatedVariable {
    type Err = DeaccError;

    /// Accepts either the short or the request name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.short_name() == s || v.request_name() == s)
            .ok_or_else(|| DeaccError::UnknownVariable {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_table() {
        let table: Vec<(&str, f64, &str)> = AccumulatedVariable::ALL
            .iter()
            .map(|v| (v.short_name(), v.divisor(), v.output_units()))
            .collect();
        assert_eq!(
            table,
            vec![
                ("ssrd", 3600.0, "W m-2"),
                ("strd", 3600.0, "W m-2"),
                ("tp", 3.6, "kg m-2 s-1"),
                ("sf", 3.6, "kg m-2 s-1"),
            ]
        );
    }

    #[test]
    fn parse_short_and_request_names() {
        for v in AccumulatedVariable::ALL {
            assert_eq!(v.short_name().parse::<AccumulatedVariable>().unwrap(), v);
            assert_eq!(v.request_name().parse::<AccumulatedVariable>().unwrap(), v);
        }
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            "t2m".parse::<AccumulatedVariable>().unwrap_err(),
            DeaccError::UnknownVariable {
                name: "t2m".to_string()
            }
        );
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("SSRD".parse::<AccumulatedVariable>().is_err());
    }

    #[test]
    fn output_name_and_display() {
        assert_eq!(AccumulatedVariable::Snowfall.output_name(), "deacc_sf");
        assert_eq!(AccumulatedVariable::TotalPrecipitation.to_string(), "tp");
    }
}
