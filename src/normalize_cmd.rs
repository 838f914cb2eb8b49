//! Normalize command: unpack a netCDF file to plain floats.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use reforce_io::normalize_to_float;

use crate::cli::NormalizeArgs;

/// Run the normalization.
pub fn run(args: NormalizeArgs) -> Result<()> {
    let _cmd = info_span!("normalize").entered();
    info!(input = %args.input.display(), output = %args.output.display(), "normalizing");
    normalize_to_float(&args.input, &args.output, &args.time_dim, args.remove_source)
        .with_context(|| format!("failed to normalize {}", args.input.display()))
}
