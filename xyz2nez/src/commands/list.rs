//! List stations command (--list mode).

use anyhow::{Context, Result};
use colored::Colorize;

use seisrot::RotationTable;

use crate::cli::Args;
use crate::output;

/// Run the list command.
pub fn run(args: &Args) -> Result<()> {
    output::print_verbose(
        &format!("Opening rotation table: {}", args.matrix.display()),
        args.verbose,
    );

    let table = RotationTable::open(&args.matrix)
        .with_context(|| format!("Failed to read rotation table: {}", args.matrix.display()))?;

    if table.is_empty() {
        output::print_warning("No stations found in rotation table");
        println!("\nNote: each station takes 4 lines: \"network station\" and 3 matrix rows.");
        return Ok(());
    }

    println!("{}", format!("Stations in '{}':", args.matrix.display()).bold());
    println!();

    let max_label = table.iter().map(|r| r.label().len()).max().unwrap_or(7).max(7);

    println!(
        "  {:>5}  {:<width$}  {:>12}  {}",
        "Index",
        "Station",
        "|R·Rᵗ - I|",
        "Notes",
        width = max_label
    );
    println!(
        "  {:->5}  {:-<width$}  {:->12}  -----",
        "",
        "",
        "",
        width = max_label
    );

    let mut irregular = 0;
    for (index, record) in table.iter().enumerate() {
        let err = record.matrix.orthonormality_error();
        let notes = if err > args.orthonormal_tolerance {
            irregular += 1;
            "not orthonormal".yellow().to_string()
        } else {
            String::new()
        };

        println!(
            "  {:>5}  {:<width$}  {:>12.3e}  {}",
            index,
            record.label(),
            err,
            notes,
            width = max_label
        );

        if args.verbose {
            for row in record.matrix.view().rows() {
                println!(
                    "  {:>5}  {:<width$}  {}",
                    "",
                    "",
                    format!("{:>12.6} {:>12.6} {:>12.6}", row[0], row[1], row[2]).dimmed(),
                    width = max_label
                );
            }
        }
    }

    println!();
    println!("{} found", output::plural(table.len(), "station"));

    if irregular > 0 {
        println!();
        println!(
            "{}: matrices of {} deviate from orthonormal by more than {:e}",
            "hint".cyan(),
            output::plural(irregular, "station"),
            args.orthonormal_tolerance
        );
    }

    Ok(())
}
