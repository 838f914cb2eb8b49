//! Humidity command: derive specific humidity from dew point and pressure.

use std::path::Path;

use anyhow::{Context, Result, bail};
use ndarray::Array2;
use tracing::{debug, info, info_span};

use reforce_humidity::constants::{OUTPUT_LONG_NAME, OUTPUT_UNITS, STANDARD_NAME};
use reforce_humidity::{check_inputs, specific_humidity_field, specific_humidity_into};
use reforce_io::{Dataset, ReaderConfig, data_variables, read_field, write_field_file};

use crate::cli::HumidityArgs;

/// Variable name and units of the standalone humidity file.
const STANDALONE_NAME: &str = "Q2";
const STANDALONE_UNITS: &str = "1";

/// Variables and checks used when adding humidity to a monthly file.
#[derive(Debug, Clone)]
pub struct HumidityOptions {
    pub dewpoint_var: String,
    pub pressure_var: String,
    pub output_var: String,
    pub strict: bool,
}

/// Run the standalone humidity derivation.
pub fn run(args: HumidityArgs) -> Result<()> {
    let _cmd = info_span!("humidity").entered();
    let reader = ReaderConfig::default();

    let dewpoint_var = first_variable(&args.dewpoint)?;
    let pressure_var = first_variable(&args.pressure)?;

    info!(path = %args.dewpoint.display(), variable = %dewpoint_var, "reading dew point");
    let dewpoint = read_field(&args.dewpoint, &dewpoint_var, &reader)
        .with_context(|| format!("failed to read {}", args.dewpoint.display()))?;
    info!(path = %args.pressure.display(), variable = %pressure_var, "reading pressure");
    let pressure = read_field(&args.pressure, &pressure_var, &reader)
        .with_context(|| format!("failed to read {}", args.pressure.display()))?;

    if args.strict {
        check_inputs(dewpoint.data().view(), pressure.data().view())
            .context("strict input check failed")?;
    }

    let q = specific_humidity_field(&dewpoint, &pressure)
        .context("dew point and pressure are not on the same grid")?;
    let out = dewpoint
        .derive(STANDALONE_NAME, STANDALONE_UNITS, q.into_data())?
        .with_long_name(OUTPUT_LONG_NAME);

    info!(path = %args.output.display(), "saving");
    write_field_file(&args.output, &out, &[("standard_name", STANDARD_NAME)])
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    Ok(())
}

fn first_variable(path: &Path) -> Result<String> {
    let names =
        data_variables(path).with_context(|| format!("failed to open {}", path.display()))?;
    match names.into_iter().next() {
        Some(name) => Ok(name),
        None => bail!("no (time, latitude, longitude) variable in {}", path.display()),
    }
}

/// Adds the humidity variable to an open monthly file, one time step at a
/// time.
///
/// In strict mode every step is checked before anything is written.
pub fn derive_humidity_dataset(ds: &mut Dataset, options: &HumidityOptions) -> Result<()> {
    let _span = info_span!("humidity", output = %options.output_var).entered();
    let dew = options.dewpoint_var.as_str();
    let sp = options.pressure_var.as_str();

    let nt = ds.time_len(dew)?;
    let nt_sp = ds.time_len(sp)?;
    if nt != nt_sp {
        bail!("'{dew}' has {nt} time steps but '{sp}' has {nt_sp}");
    }

    if options.strict {
        for t in 0..nt {
            let d = ds.read_time_slice(dew, t)?;
            let p = ds.read_time_slice(sp, t)?;
            check_inputs(d.view(), p.view())
                .with_context(|| format!("strict input check failed at time step {t}"))?;
        }
        debug!(nt, "strict input check passed");
    }

    let mut q: Option<Array2<f64>> = None;
    for t in 0..nt {
        let d = ds.read_time_slice(dew, t)?;
        let p = ds.read_time_slice(sp, t)?;
        let buffer = q.get_or_insert_with(|| Array2::zeros(d.raw_dim()));
        specific_humidity_into(d.view(), p.view(), buffer.view_mut())
            .with_context(|| format!("'{dew}' and '{sp}' differ in shape"))?;
        if t == 0 {
            ds.define_like(
                &options.output_var,
                dew,
                &[("units", OUTPUT_UNITS), ("long_name", OUTPUT_LONG_NAME)],
            )?;
        }
        ds.write_time_slice(&options.output_var, t, buffer.view())?;
    }
    info!(nt, "derived specific humidity");
    Ok(())
}
