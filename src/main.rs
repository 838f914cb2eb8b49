mod cli;
mod config;
mod convert;
mod deacc_cmd;
mod download;
mod humidity_cmd;
mod logging;
mod normalize_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Download(args) => download::run(args),
        Command::Humidity(args) => humidity_cmd::run(args),
        Command::Deaccumulate(args) => deacc_cmd::run(args),
        Command::Normalize(args) => normalize_cmd::run(args),
    }
}
