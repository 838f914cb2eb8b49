use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reforce_calendar::YearMonth;

/// reforce: ERA5 reanalysis forcing fields.
#[derive(Parser)]
#[command(
    name = "reforce",
    version,
    about = "Fetch and post-process ERA5 reanalysis forcing fields"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Download monthly files and post-process them.
    Download(DownloadArgs),
    /// Derive specific humidity from dew-point and pressure files.
    Humidity(HumidityArgs),
    /// Add de-accumulated rate variables to a file in place.
    Deaccumulate(DeaccumulateArgs),
    /// Rewrite a packed file with plain floating-point variables.
    Normalize(NormalizeArgs),
}

/// Arguments for the `download` subcommand.
#[derive(clap::Args)]
pub struct DownloadArgs {
    /// Month to download, as YYYY-MM.
    pub month: YearMonth,

    /// Last month to download, as YYYY-MM. Defaults to MONTH.
    #[arg(short, long)]
    pub end_month: Option<YearMonth>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Keep the downloaded file as is, without post-processing.
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for the `humidity` subcommand.
#[derive(clap::Args)]
pub struct HumidityArgs {
    /// File with 2 m dew-point temperature (K).
    pub dewpoint: PathBuf,

    /// File with surface pressure (Pa).
    pub pressure: PathBuf,

    /// Output file for specific humidity.
    pub output: PathBuf,

    /// Reject inputs for which the formula is singular or meaningless.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `deaccumulate` subcommand.
#[derive(clap::Args)]
pub struct DeaccumulateArgs {
    /// File to add `deacc_*` variables to.
    pub file: PathBuf,

    /// Variable to de-accumulate; repeat for several. Defaults to config.
    #[arg(long = "var")]
    pub vars: Vec<String>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `normalize` subcommand.
#[derive(clap::Args)]
pub struct NormalizeArgs {
    /// Packed input file.
    pub input: PathBuf,

    /// Output file.
    pub output: PathBuf,

    /// Delete the input once the output is written.
    #[arg(long)]
    pub remove_source: bool,

    /// Dimension to make unlimited.
    #[arg(long, default_value = "time")]
    pub time_dim: String,
}
