//! Main rotation command.

use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use seisrot::{
    open_source, RotateConfig, RotationMode, RotationTable, Rotator, SeismogramSource, SourceFormat,
    StationOutcome,
};

use crate::checks;
use crate::cli::Args;
use crate::output;

/// Run the rotate command.
pub fn run(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    let config = build_config(args)?;
    let table = open_table(args)?;
    let source = open_input(args)?;

    checks::report(&table, &config, args.orthonormal_tolerance);

    output::print_verbose(
        &format!(
            "Rotating {} ({}, {}) with {}",
            output::plural(table.len(), "station"),
            config.mode,
            config.mode.direction(),
            output::plural(config.workers, "worker")
        ),
        args.verbose,
    );

    let rotator = Rotator::new(&table, source.as_ref(), config);
    let report = rotator.run().context("Rotation aborted")?;

    if args.verbose {
        for station in report.iter() {
            let detail = match &station.outcome {
                StationOutcome::Rotated { outputs, samples } => format!(
                    "{} ({} samples)",
                    output::plural(outputs.len(), "file"),
                    output::format_number(*samples)
                ),
                StationOutcome::Skipped { missing } => format!("missing {}", missing),
                StationOutcome::Failed { error } => error.to_string(),
            };
            output::print_verbose(
                &format!("{} {}: {}", station.label, station.outcome.status(), detail),
                true,
            );
        }
    }

    for (station, error) in report.failures() {
        output::print_warning(&format!("{} failed: {}", station, error));
    }

    let elapsed = start_time.elapsed().as_secs_f64();
    let summary = format!(
        "Rotated {} of {} ({} written, {} skipped) in {}",
        report.rotated(),
        output::plural(report.len(), "station"),
        output::plural(report.files_written(), "file"),
        report.skipped(),
        output::format_duration(elapsed)
    );

    if report.is_success() {
        output::print_success(&summary, args.quiet);
        Ok(())
    } else {
        output::print_info(&summary, args.quiet);
        bail!(
            "{} could not be rotated",
            output::plural(report.failed(), "station")
        )
    }
}

/// Build the rotation configuration from command-line arguments.
pub fn build_config(args: &Args) -> Result<RotateConfig> {
    let mode: RotationMode = args
        .rotate
        .parse()
        .with_context(|| format!("Invalid rotation mode '{}'", args.rotate))?;

    let input_template = args
        .from_template
        .parse()
        .with_context(|| format!("Invalid input template '{}'", args.from_template))?;

    let output_template = args
        .to_template
        .parse()
        .with_context(|| format!("Invalid output template '{}'", args.to_template))?;

    let output_dir = args
        .to_dir
        .as_ref()
        .ok_or_else(|| anyhow!("Output directory is required (--to-dir)"))?;

    let config = RotateConfig::new(mode, input_template, output_template)
        .output_dir(output_dir)
        .workers(args.worker_count());

    config
        .validate()
        .with_context(|| format!("Invalid output template '{}'", args.to_template))?;

    Ok(config)
}

/// Read the rotation table named by `--matrix`.
pub fn open_table(args: &Args) -> Result<RotationTable> {
    output::print_verbose(
        &format!("Opening rotation table: {}", args.matrix.display()),
        args.verbose,
    );

    RotationTable::open(&args.matrix)
        .with_context(|| format!("Failed to read rotation table: {}", args.matrix.display()))
}

/// Open the seismogram source under `--from-dir`.
pub fn open_input(args: &Args) -> Result<Box<dyn SeismogramSource>> {
    let input_dir: &Path = args
        .from_dir
        .as_deref()
        .ok_or_else(|| anyhow!("Input directory is required (--from-dir)"))?;

    let format: SourceFormat = args.input_format.into();
    output::print_verbose(
        &format!("Reading {} seismograms from {}", format, input_dir.display()),
        args.verbose,
    );

    open_source(format, input_dir, &args.container)
        .with_context(|| format!("Failed to open {} input in {}", format, input_dir.display()))
}
