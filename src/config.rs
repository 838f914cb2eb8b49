use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level reforce configuration.
///
/// Every section and field is optional; the defaults reproduce the stock
/// ERA5 request over northern Europe with hourly post-processing.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ReforceConfig {
    /// What to ask the archive for.
    #[serde(default)]
    pub request: RequestToml,

    /// Where and how to store monthly files.
    #[serde(default)]
    pub output: OutputToml,

    /// De-accumulation settings.
    #[serde(default)]
    pub deaccumulate: DeaccumulateToml,

    /// Humidity derivation settings.
    #[serde(default)]
    pub humidity: HumidityToml,

    /// Archive connection settings.
    #[serde(default)]
    pub cds: CdsToml,
}

/// Reads a configuration file, or returns the defaults when `path` is
/// `None`.
pub fn load(path: Option<&Path>) -> Result<ReforceConfig> {
    let Some(path) = path else {
        return Ok(ReforceConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
}

// ----- [request] -----

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestToml {
    #[serde(default = "default_product")]
    pub product: String,
    #[serde(default = "default_product_type")]
    pub product_type: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_variables")]
    pub variables: Vec<String>,
    /// `[north, west, south, east]`; `[]` asks for the whole globe.
    #[serde(default = "default_area", deserialize_with = "optional_array")]
    pub area: Option<[f64; 4]>,
    /// `[east_west, north_south]` spacing in degrees; `[]` keeps the
    /// archive's native grid.
    #[serde(default = "default_grid", deserialize_with = "optional_array")]
    pub grid: Option<[f64; 2]>,
}

impl Default for RequestToml {
    fn default() -> Self {
        Self {
            product: default_product(),
            product_type: default_product_type(),
            format: default_format(),
            variables: default_variables(),
            area: default_area(),
            grid: default_grid(),
        }
    }
}

fn default_product() -> String {
    "reanalysis-era5-single-levels".to_string()
}
fn default_product_type() -> String {
    "reanalysis".to_string()
}
fn default_format() -> String {
    "netcdf".to_string()
}
fn default_variables() -> Vec<String> {
    [
        "10m_u_component_of_wind",
        "10m_v_component_of_wind",
        "2m_dewpoint_temperature",
        "2m_temperature",
        "surface_pressure",
        "snowfall",
        "total_precipitation",
        "surface_solar_radiation_downwards",
        "surface_thermal_radiation_downwards",
    ]
    .map(String::from)
    .to_vec()
}
/// Reads `[]` as `None` and `[x; N]` as `Some`. TOML has no null, so an
/// empty array is how a file switches off a default.
fn optional_array<'de, D, const N: usize>(deserializer: D) -> Result<Option<[f64; N]>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values = Vec::<f64>::deserialize(deserializer)?;
    if values.is_empty() {
        return Ok(None);
    }
    let got = values.len();
    values.try_into().map(Some).map_err(|_| {
        serde::de::Error::invalid_length(got, &format!("an empty array or {N} numbers").as_str())
    })
}

fn default_area() -> Option<[f64; 4]> {
    Some([66.0, -5.0, 48.0, 31.0])
}
fn default_grid() -> Option<[f64; 2]> {
    Some([0.206_896_551_724_137_93, 0.1125])
}

// ----- [output] -----

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// File name with `{year}` and `{month}` placeholders.
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
    #[serde(default = "default_time_dim")]
    pub time_dim: String,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_pattern: default_file_pattern(),
            time_dim: default_time_dim(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}
fn default_file_pattern() -> String {
    "era5_y{year}m{month}.nc".to_string()
}
fn default_time_dim() -> String {
    "time".to_string()
}

// ----- [deaccumulate] -----

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeaccumulateToml {
    #[serde(default = "default_deacc_variables")]
    pub variables: Vec<String>,
}

impl Default for DeaccumulateToml {
    fn default() -> Self {
        Self {
            variables: default_deacc_variables(),
        }
    }
}

fn default_deacc_variables() -> Vec<String> {
    ["ssrd", "strd", "tp", "sf"].map(String::from).to_vec()
}

// ----- [humidity] -----

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HumidityToml {
    #[serde(default = "default_dewpoint_var")]
    pub dewpoint_var: String,
    #[serde(default = "default_pressure_var")]
    pub pressure_var: String,
    #[serde(default = "default_output_var")]
    pub output_var: String,
    #[serde(default)]
    pub strict: bool,
}

impl Default for HumidityToml {
    fn default() -> Self {
        Self {
            dewpoint_var: default_dewpoint_var(),
            pressure_var: default_pressure_var(),
            output_var: default_output_var(),
            strict: false,
        }
    }
}

fn default_dewpoint_var() -> String {
    "d2m".to_string()
}
fn default_pressure_var() -> String {
    "sp".to_string()
}
fn default_output_var() -> String {
    "q2".to_string()
}

// ----- [cds] -----

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CdsToml {
    /// Overrides `CDSAPI_URL` / `.cdsapirc`; needs `key` as well.
    #[serde(default)]
    pub url: Option<String>,
    /// `UID:KEY`.
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_poll_max_secs")]
    pub poll_max_secs: u64,
}

impl Default for CdsToml {
    fn default() -> Self {
        Self {
            url: None,
            key: None,
            timeout_secs: default_timeout_secs(),
            poll_max_secs: default_poll_max_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    3600
}
fn default_poll_max_secs() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: ReforceConfig = toml::from_str("").unwrap();
        assert_eq!(config.request.product, "reanalysis-era5-single-levels");
        assert_eq!(config.request.variables.len(), 9);
        assert_eq!(config.request.area, Some([66.0, -5.0, 48.0, 31.0]));
        assert_eq!(config.output.file_pattern, "era5_y{year}m{month}.nc");
        assert_eq!(config.deaccumulate.variables, ["ssrd", "strd", "tp", "sf"]);
        assert_eq!(config.humidity.dewpoint_var, "d2m");
        assert!(!config.humidity.strict);
        assert_eq!(config.cds.timeout_secs, 3600);
        assert!(config.cds.key.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: ReforceConfig = toml::from_str(
            r#"
            [request]
            variables = ["2m_temperature"]
            grid = [0.25, 0.25]

            [humidity]
            strict = true

            [output]
            directory = "/data/era5"
            "#,
        )
        .unwrap();
        assert_eq!(config.request.variables, ["2m_temperature"]);
        assert_eq!(config.request.grid, Some([0.25, 0.25]));
        assert_eq!(config.request.format, "netcdf");
        assert!(config.humidity.strict);
        assert_eq!(config.humidity.output_var, "q2");
        assert_eq!(config.output.directory, PathBuf::from("/data/era5"));
    }

    #[test]
    fn empty_arrays_switch_off_area_and_grid() {
        let config: ReforceConfig = toml::from_str(
            r#"
            [request]
            area = []
            grid = []
            "#,
        )
        .unwrap();
        assert_eq!(config.request.area, None);
        assert_eq!(config.request.grid, None);
    }

    #[test]
    fn area_of_wrong_length_rejected() {
        let err = toml::from_str::<ReforceConfig>("[request]\narea = [66.0, -5.0, 48.0]\n")
            .unwrap_err();
        assert!(err.to_string().contains("4 numbers"), "{err}");
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(toml::from_str::<ReforceConfig>("[request]\nareas = [1, 2, 3, 4]\n").is_err());
        assert!(toml::from_str::<ReforceConfig>("[plotting]\n").is_err());
    }

    #[test]
    fn load_without_path_is_default() {
        let config = load(None).unwrap();
        assert_eq!(config.output.time_dim, "time");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load(Some(Path::new("/nonexistent/reforce.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config"));
    }
}
