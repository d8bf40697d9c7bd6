//! Diagnostic logging setup.
//!
//! Library progress and per-station warnings go through `tracing` to stderr.
//! `RUST_LOG` takes precedence; otherwise `--verbose` enables debug output,
//! `--quiet` keeps only errors, and the default shows warnings.

use tracing_subscriber::EnvFilter;

use crate::cli::Args;

/// Filter directive derived from the verbosity flags.
fn default_directive(args: &Args) -> &'static str {
    if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Safe to call once per process.
pub fn init(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(args)));

    // A subscriber may already be set (e.g. in tests); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
