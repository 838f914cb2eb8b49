//! Download command: fetch monthly files and post-process them.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{error, info, info_span, warn};

use reforce_calendar::{YearMonth, month_range};
use reforce_cds::{CdsClient, Retrieve};
use reforce_deacc::AccumulatedVariable;
use reforce_grid::TimeAxis;
use reforce_io::{Dataset, ReaderConfig, normalize_to_float};

use crate::cli::DownloadArgs;
use crate::config::{self, ReforceConfig, RequestToml};
use crate::convert;
use crate::deacc_cmd::deaccumulate_dataset;
use crate::humidity_cmd::{HumidityOptions, derive_humidity_dataset};

/// Everything needed to turn one month into a finished file.
pub struct MonthPipeline<'a> {
    request: &'a RequestToml,
    file_pattern: &'a str,
    time_dim: &'a str,
    reader: ReaderConfig,
    deaccumulate: Vec<AccumulatedVariable>,
    humidity: HumidityOptions,
    raw: bool,
}

impl<'a> MonthPipeline<'a> {
    /// Resolves the pipeline from the configuration. Variable names are
    /// checked here so a bad name fails before anything is fetched.
    pub fn from_config(config: &'a ReforceConfig, raw: bool) -> Result<Self> {
        Ok(Self {
            request: &config.request,
            file_pattern: &config.output.file_pattern,
            time_dim: &config.output.time_dim,
            reader: convert::build_reader_config(&config.output)?,
            deaccumulate: convert::parse_deacc_variables(&config.deaccumulate.variables)?,
            humidity: convert::build_humidity_options(&config.humidity),
            raw,
        })
    }
}

/// Run the download pipeline over the requested month range.
pub fn run(args: DownloadArgs) -> Result<()> {
    let _cmd = info_span!("download").entered();
    let config = config::load(args.config.as_deref())?;

    let end = args.end_month.unwrap_or(args.month);
    let months = month_range(args.month, end)?;

    let dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let pipeline = MonthPipeline::from_config(&config, args.raw)?;
    let client = CdsClient::new(
        convert::build_credentials(&config.cds)?,
        convert::build_client_config(&config.cds)?,
    )?;

    download_months(&client, &pipeline, &dir, &months)?;
    Ok(())
}

/// Processes every month in turn. A failed month is logged and the rest
/// are still attempted; the call fails at the end if any month did.
pub fn download_months<R: Retrieve>(
    archive: &R,
    pipeline: &MonthPipeline<'_>,
    dir: &Path,
    months: &[YearMonth],
) -> Result<Vec<PathBuf>> {
    if let (Some(first), Some(last)) = (months.first(), months.last()) {
        info!(start = %first, end = %last, n = months.len(), "downloading range");
    }

    let mut written = Vec::with_capacity(months.len());
    let mut failed = Vec::new();
    for &month in months {
        let _month = info_span!("month", %month).entered();
        let started = Instant::now();
        match process_month(archive, pipeline, dir, month) {
            Ok(path) => {
                info!(path = %path.display(), duration = ?started.elapsed(), "month done");
                written.push(path);
            }
            Err(e) => {
                error!(error = %format!("{e:#}"), duration = ?started.elapsed(), "month failed");
                failed.push(month.to_string());
            }
        }
    }

    if !failed.is_empty() {
        bail!(
            "{} of {} month(s) failed: {}",
            failed.len(),
            months.len(),
            failed.join(", ")
        );
    }
    Ok(written)
}

/// Fetch, normalize, de-accumulate and derive humidity for one month.
///
/// The download lands in `tmp_<name>` and is removed once the normalized
/// file exists. In raw mode the download is the result.
pub fn process_month<R: Retrieve>(
    archive: &R,
    pipeline: &MonthPipeline<'_>,
    dir: &Path,
    month: YearMonth,
) -> Result<PathBuf> {
    let name = convert::month_file_name(pipeline.file_pattern, month)?;
    let output = dir.join(&name);
    let request = convert::build_request(pipeline.request, month)?;

    if pipeline.raw {
        archive
            .retrieve(&pipeline.request.product, &request, &output)
            .with_context(|| format!("failed to fetch {month}"))?;
        return Ok(output);
    }

    let tmp = dir.join(format!("tmp_{name}"));
    archive
        .retrieve(&pipeline.request.product, &request, &tmp)
        .with_context(|| format!("failed to fetch {month}"))?;

    info!(path = %output.display(), "converting to float");
    normalize_to_float(&tmp, &output, pipeline.time_dim, true)
        .with_context(|| format!("failed to normalize {}", tmp.display()))?;

    let mut ds = Dataset::open(&output, pipeline.reader.clone())?;
    check_coverage(&ds.time_axis()?, month);
    if pipeline.deaccumulate.is_empty() {
        warn!("no variables to de-accumulate");
    } else {
        deaccumulate_dataset(&mut ds, &pipeline.deaccumulate)
            .with_context(|| format!("failed to de-accumulate {}", output.display()))?;
    }
    derive_humidity_dataset(&mut ds, &pipeline.humidity)
        .with_context(|| format!("failed to derive humidity in {}", output.display()))?;
    Ok(output)
}

/// Logs the span of the time axis and warns when it strays outside
/// `month`. Returns whether the whole axis lies inside the month.
fn check_coverage(time: &TimeAxis, month: YearMonth) -> bool {
    let last = time.len().saturating_sub(1);
    let (Some(first), Some(last)) = (time.datetime_at(0), time.datetime_at(last)) else {
        warn!(units = %time.units(), "time axis has no calendar timestamps");
        return false;
    };
    info!(%first, %last, "time coverage");

    let inside = first.date() >= month.first_day() && last.date() < month.next().first_day();
    if !inside {
        warn!(%first, %last, "time axis reaches outside the requested month");
    }
    inside
}
