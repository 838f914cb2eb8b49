//! Deaccumulate command: add `deacc_*` rate variables to a file.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use reforce_deacc::{AccumulatedVariable, deaccumulate};
use reforce_io::Dataset;

use crate::cli::DeaccumulateArgs;
use crate::config;
use crate::convert;

/// Run the in-place de-accumulation.
pub fn run(args: DeaccumulateArgs) -> Result<()> {
    let _cmd = info_span!("deaccumulate").entered();
    let config = config::load(args.config.as_deref())?;

    let names = if args.vars.is_empty() {
        &config.deaccumulate.variables
    } else {
        &args.vars
    };
    let variables = convert::parse_deacc_variables(names)?;

    let mut ds = Dataset::open(&args.file, convert::build_reader_config(&config.output)?)
        .with_context(|| format!("failed to open {}", args.file.display()))?;
    deaccumulate_dataset(&mut ds, &variables)
}

/// De-accumulates every variable in `variables` and writes the results
/// next to their sources.
///
/// Presence of all sources and uniformity of the time axis are checked
/// before anything is written.
pub fn deaccumulate_dataset(ds: &mut Dataset, variables: &[AccumulatedVariable]) -> Result<()> {
    for v in variables {
        if !ds.has_variable(v.short_name()) {
            bail!(
                "variable '{}' not found in {}",
                v.short_name(),
                ds.path().display()
            );
        }
    }

    let time = ds.time_axis()?;
    let step = time
        .uniform_step_hours()
        .with_context(|| format!("cannot de-accumulate {}", ds.path().display()))?;
    info!(step_hours = step, n = variables.len(), "de-accumulating");

    for &v in variables {
        let _var = info_span!("variable", name = v.short_name()).entered();
        let field = ds.read_field(v.short_name())?;
        let rates = deaccumulate(&field, v)?;
        ds.write_field(&rates, v.short_name(), &[])?;
        info!(output = %rates.name(), units = %rates.units(), "written");
    }
    Ok(())
}
