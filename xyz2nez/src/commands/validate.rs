//! Dry-run validation command.

use anyhow::Result;
use colored::Colorize;

use seisrot::Rotator;

use crate::checks;
use crate::cli::Args;
use crate::commands::rotate::{build_config, open_input, open_table};
use crate::output;

/// Run the validate (dry-run) command.
pub fn run(args: &Args) -> Result<()> {
    output::print_info(
        &format!("{} (no files will be written)\n", "Dry run mode".yellow()),
        args.quiet,
    );

    let config = build_config(args)?;
    let table = open_table(args)?;
    let source = open_input(args)?;

    output::print_header("Rotation Plan");
    output::print_kv("Matrix file", &args.matrix.display().to_string(), 2);
    output::print_kv("Stations", &output::format_number(table.len()), 2);
    output::print_kv(
        "Mode",
        &format!("{} ({})", config.mode, config.mode.direction()),
        2,
    );
    output::print_kv("Input template", config.input_template.as_str(), 2);
    output::print_kv("Output template", config.output_template.as_str(), 2);
    output::print_kv("Output directory", &config.output_dir.display().to_string(), 2);
    output::print_kv("Workers", &config.workers.to_string(), 2);
    println!();

    output::print_header("Sanity Checks");
    let warnings = checks::check_all(&table, &config, args.orthonormal_tolerance);
    if warnings.is_empty() {
        println!("  {} All checks passed", "✓".green());
    } else {
        for warning in &warnings {
            println!("  {} {}", "⚠".yellow(), warning);
        }
    }
    println!();

    let rotator = Rotator::new(&table, source.as_ref(), config);
    let plans = rotator.plan_all();

    output::print_header("Stations");
    let mut complete = 0;
    for plan in &plans {
        let status = if plan.is_complete() {
            complete += 1;
            "ok".green()
        } else {
            "skip".yellow()
        };
        println!("  {} {}", status, plan.label.bold());

        if !args.verbose && plan.is_complete() {
            continue;
        }

        for src in &plan.sources {
            let detail = match (src.exists, src.samples) {
                (false, _) => "missing".red().to_string(),
                (true, Some(n)) => format!("{} samples", output::format_number(n)),
                (true, None) => "unreadable".yellow().to_string(),
            };
            println!("      {} {} ({})", "<".dimmed(), src.location, detail);
        }
        if args.verbose {
            for target in &plan.targets {
                println!("      {} {}", ">".dimmed(), target.display());
            }
        }
    }
    println!();

    let skipped = plans.len() - complete;
    let files = plans
        .iter()
        .filter(|p| p.is_complete())
        .map(|p| p.targets.len())
        .sum::<usize>();

    println!(
        "{} would be rotated, {} skipped, {} written",
        output::plural(complete, "station"),
        skipped,
        output::plural(files, "file")
    );

    Ok(())
}
