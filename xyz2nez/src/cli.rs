//! Command-line argument definitions using clap derive macros.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use seisrot::SourceFormat;

/// Rotate seismograms between Cartesian (XYZ) and geographic (NEZ) frames.
///
/// xyz2nez reads a rotation-matrix file listing one 3x3 matrix per station
/// (rows N, E, Z; columns X, Y, Z), rotates each station's three-component
/// seismograms and writes one ASCII file per output component.
#[derive(Parser, Debug)]
#[command(name = "xyz2nez")]
#[command(author, version, about, long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Args {
    /// Rotation-matrix file (4 lines per station: "network station" + 3 rows)
    #[arg(short = 'm', long = "matrix", value_name = "FILE")]
    pub matrix: PathBuf,

    // ========================================================================
    // Rotation
    // ========================================================================
    /// Rotation mode: "XYZ->NEZ" (Cartesian to geographic) or "XYZ<-NEZ"
    ///
    /// Use 0 for a component that should not be read or written,
    /// e.g. "XYZ->00Z" keeps only the vertical component.
    #[arg(
        short,
        long,
        value_name = "MODE",
        default_value = "XYZ->NEZ",
        allow_hyphen_values = true
    )]
    pub rotate: String,

    // ========================================================================
    // Input / Output
    // ========================================================================
    /// Directory holding the source seismograms (or the HDF5 container)
    #[arg(long, value_name = "DIR")]
    pub from_dir: Option<PathBuf>,

    /// Directory for rotated seismograms (created if missing)
    #[arg(long, value_name = "DIR")]
    pub to_dir: Option<PathBuf>,

    /// Source name template; ${nt}, ${sta}, ${comp} stand for network, station, component
    #[arg(long, value_name = "TEMPLATE", default_value = "${nt}.${sta}.BX${comp}.semd")]
    pub from_template: String,

    /// Output file name template; same placeholders as --from-template
    #[arg(long, value_name = "TEMPLATE", default_value = "${nt}.${sta}.BX${comp}.sem.ascii")]
    pub to_template: String,

    /// Storage format of the source seismograms (h5 needs a build with `--features hdf5`)
    #[arg(short, long, value_enum, default_value = "h5")]
    pub input_format: InputFormatArg,

    /// Name of the HDF5 container inside --from-dir
    #[arg(long, value_name = "NAME", default_value = seisrot::DEFAULT_CONTAINER)]
    pub container: String,

    // ========================================================================
    // Execution
    // ========================================================================
    /// Number of worker threads (default: number of CPUs)
    #[arg(short = 'j', long, value_name = "N")]
    pub workers: Option<usize>,

    /// Warn about station matrices deviating from orthonormal by more than this
    #[arg(long, value_name = "TOL", default_value = "1e-4")]
    pub orthonormal_tolerance: f64,

    // ========================================================================
    // Mode Selection
    // ========================================================================
    /// List stations in the rotation-matrix file and exit
    #[arg(short, long)]
    pub list: bool,

    /// Show what would be read and written without writing anything
    #[arg(long)]
    pub dry_run: bool,

    // ========================================================================
    // Output Control
    // ========================================================================
    /// Show detailed progress and information
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Storage format of the source seismograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormatArg {
    /// One HDF5 container holding every station component
    H5,
    /// One two-column text file per station component
    Ascii,
}

impl From<InputFormatArg> for SourceFormat {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::H5 => SourceFormat::Hdf5,
            InputFormatArg::Ascii => SourceFormat::Ascii,
        }
    }
}

impl Args {
    /// Validate argument combinations.
    pub fn validate(&self) -> Result<(), String> {
        // Quiet and verbose are mutually exclusive
        if self.quiet && self.verbose {
            return Err("Cannot use both --quiet and --verbose".to_string());
        }

        // Check matrix file exists
        if !self.matrix.is_file() {
            return Err(format!(
                "Rotation-matrix file not found: {}",
                self.matrix.display()
            ));
        }

        // List mode needs nothing else
        if self.list {
            return Ok(());
        }

        match self.from_dir {
            None => return Err("Input directory is required (--from-dir)".to_string()),
            Some(ref dir) if !dir.is_dir() => {
                return Err(format!("Input directory not found: {}", dir.display()));
            }
            Some(_) => {}
        }

        if self.to_dir.is_none() {
            return Err("Output directory is required (--to-dir)".to_string());
        }

        if self.workers == Some(0) {
            return Err("Worker count must be at least 1".to_string());
        }

        let tol = self.orthonormal_tolerance;
        if tol.is_nan() || tol < 0.0 {
            return Err(format!(
                "Orthonormality tolerance must be non-negative, got {}",
                tol
            ));
        }

        Ok(())
    }

    /// Worker count, defaulting to the available parallelism.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Example usage shown in --help.
const EXAMPLES: &str = r#"
EXAMPLES:
    # Cartesian (SPECFEM3D + Cube2sph) to geographic, from an HDF5 container
    # (h5 input, the default, needs xyz2nez built with `--features hdf5`)
    xyz2nez -m rotation_nu -r 'XYZ->NEZ' \
        --from-dir OUTPUT_FILES --to-dir OUTPUT_FILES_sph

    # Same, reading one ASCII file per component
    xyz2nez -m rotation_nu -i ascii --from-dir OUTPUT_FILES --to-dir OUTPUT_FILES_sph \
        --from-template '${nt}.${sta}.BX${comp}.semd' \
        --to-template '${nt}.${sta}.BX${comp}.sem.ascii'

    # Geographic back to Cartesian (e.g. adjoint sources)
    xyz2nez -m rotation_nu -r 'XYZ<-NEZ' -i ascii \
        --from-dir OUTPUT_FILES_sph --to-dir OUTPUT_FILES_cart \
        --from-template '${nt}.${sta}.BX${comp}.sem.ascii' \
        --to-template '${nt}.${sta}.BX${comp}.semd'

    # Vertical component only
    xyz2nez -m rotation_nu -r 'XYZ->00Z' -i ascii --from-dir OUTPUT_FILES --to-dir OUT

    # List stations, or check what would happen without writing
    xyz2nez -m rotation_nu --list
    xyz2nez -m rotation_nu -i ascii --from-dir OUTPUT_FILES --to-dir OUT --dry-run

    Quote templates with single quotes so the shell leaves ${...} alone.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            matrix: PathBuf::from("rotation_nu"),
            rotate: "XYZ->NEZ".to_string(),
            from_dir: Some(PathBuf::from("OUTPUT_FILES")),
            to_dir: Some(PathBuf::from("OUTPUT_FILES_sph")),
            from_template: "${nt}.${sta}.BX${comp}.semd".to_string(),
            to_template: "${nt}.${sta}.BX${comp}.sem.ascii".to_string(),
            input_format: InputFormatArg::Ascii,
            container: seisrot::DEFAULT_CONTAINER.to_string(),
            workers: None,
            orthonormal_tolerance: 1e-4,
            list: false,
            dry_run: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_worker_count() {
        let mut a = args();
        a.workers = Some(3);
        assert_eq!(a.worker_count(), 3);

        a.workers = None;
        assert!(a.worker_count() >= 1);
    }

    #[test]
    fn test_tolerance_must_be_non_negative() {
        let temp = tempfile::TempDir::new().unwrap();
        let matrix = temp.path().join("rotation_nu");
        std::fs::write(&matrix, "").unwrap();

        let mut a = args();
        a.matrix = matrix;
        a.list = false;
        a.from_dir = Some(temp.path().to_path_buf());

        a.orthonormal_tolerance = -1.0;
        assert!(a.validate().unwrap_err().contains("non-negative"));

        a.orthonormal_tolerance = f64::NAN;
        assert!(a.validate().unwrap_err().contains("non-negative"));

        a.orthonormal_tolerance = 0.0;
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        let mut a = args();
        a.quiet = true;
        a.verbose = true;
        assert!(a.validate().unwrap_err().contains("--quiet"));
    }

    #[test]
    fn test_input_format_mapping() {
        assert_eq!(SourceFormat::from(InputFormatArg::H5), SourceFormat::Hdf5);
        assert_eq!(SourceFormat::from(InputFormatArg::Ascii), SourceFormat::Ascii);
    }

    #[test]
    fn test_parse_defaults() {
        let a = Args::try_parse_from(["xyz2nez", "-m", "rotation_nu", "--list"]).unwrap();
        assert_eq!(a.rotate, "XYZ->NEZ");
        assert_eq!(a.input_format, InputFormatArg::H5);
        assert_eq!(a.container, "seismograms.h5");
        assert!(a.list);
    }

    #[test]
    fn test_parse_inverse_mode() {
        let a = Args::try_parse_from(["xyz2nez", "-m", "r", "-r", "XYZ<-NEZ", "-i", "ascii"])
            .unwrap();
        assert_eq!(a.rotate, "XYZ<-NEZ");
        assert_eq!(a.input_format, InputFormatArg::Ascii);
    }
}
