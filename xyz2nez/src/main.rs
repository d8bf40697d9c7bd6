//! xyz2nez - Rotate seismograms between Cartesian and geographic frames.
//!
//! This tool reads per-station rotation matrices and three-component
//! seismograms (HDF5 container or ASCII files) and writes the rotated
//! components as two-column ASCII files.

mod checks;
mod cli;
mod commands;
mod logging;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use cli::Args;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    logging::init(&args);

    // Run the appropriate command
    if let Err(e) = run(args) {
        output::print_error(&e);
        std::process::exit(1);
    }
}

/// Main dispatch function.
fn run(args: Args) -> Result<()> {
    // Validate arguments
    args.validate().map_err(|e| anyhow::anyhow!("{}", e))?;

    debug!(
        matrix = %args.matrix.display(),
        list = args.list,
        dry_run = args.dry_run,
        "dispatching"
    );

    // Dispatch to appropriate command
    if args.list {
        commands::list::run(&args)
    } else if args.dry_run {
        commands::validate::run(&args)
    } else {
        commands::rotate::run(&args)
    }
}
