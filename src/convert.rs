//! Pure conversion functions: TOML config structs -> crate API config types.

use std::time::Duration;

use anyhow::{Context, Result, bail};

use reforce_calendar::YearMonth;
use reforce_cds::{Area, ClientConfig, Credentials, GridSpacing, RetrieveRequest};
use reforce_deacc::AccumulatedVariable;
use reforce_io::ReaderConfig;

use crate::config::*;
use crate::humidity_cmd::HumidityOptions;

/// Parses de-accumulation variable names, failing on the first unknown one.
pub fn parse_deacc_variables(names: &[String]) -> Result<Vec<AccumulatedVariable>> {
    names
        .iter()
        .map(|n| {
            n.parse::<AccumulatedVariable>()
                .with_context(|| format!("cannot de-accumulate {n:?}"))
        })
        .collect()
}

/// Expands `{year}` and `{month}` in a file name pattern.
pub fn month_file_name(pattern: &str, month: YearMonth) -> Result<String> {
    if !pattern.contains("{year}") || !pattern.contains("{month}") {
        bail!("file pattern {pattern:?} must contain both {{year}} and {{month}}");
    }
    Ok(pattern
        .replace("{year}", &format!("{:04}", month.year()))
        .replace("{month}", &format!("{:02}", month.month())))
}

/// Builds the retrieve request for one month from the TOML request section.
pub fn build_request(request: &RequestToml, month: YearMonth) -> Result<RetrieveRequest> {
    if request.variables.is_empty() {
        bail!("[request].variables is empty");
    }
    let mut built = RetrieveRequest::monthly(&request.variables, month)
        .with_product_type(&request.product_type)
        .with_format(&request.format);
    if let Some(area) = request.area {
        built = built.with_area(Area::from(area));
    }
    if let Some(grid) = request.grid {
        built = built.with_grid(GridSpacing::from(grid));
    }
    built.validate()?;
    Ok(built)
}

/// Builds a [`ReaderConfig`] from the TOML output section.
pub fn build_reader_config(output: &OutputToml) -> Result<ReaderConfig> {
    let cfg = ReaderConfig::default().with_time_var(&output.time_dim);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`ClientConfig`] from the TOML cds section.
pub fn build_client_config(cds: &CdsToml) -> Result<ClientConfig> {
    let cfg = ClientConfig::default()
        .with_timeout(Duration::from_secs(cds.timeout_secs))
        .with_poll_max(Duration::from_secs(cds.poll_max_secs));
    cfg.validate()?;
    Ok(cfg)
}

/// Resolves credentials: the config file if it names both url and key,
/// otherwise the environment and `.cdsapirc`.
pub fn build_credentials(cds: &CdsToml) -> Result<Credentials> {
    match (&cds.url, &cds.key) {
        (Some(url), Some(key)) => Ok(Credentials::new(url.as_str(), key)?),
        (None, None) => Ok(Credentials::from_env()?),
        _ => bail!("[cds] needs both url and key, or neither"),
    }
}

/// Builds the humidity options from the TOML humidity section.
pub fn build_humidity_options(humidity: &HumidityToml) -> HumidityOptions {
    HumidityOptions {
        dewpoint_var: humidity.dewpoint_var.clone(),
        pressure_var: humidity.pressure_var.clone(),
        output_var: humidity.output_var.clone(),
        strict: humidity.strict,
    }
}
