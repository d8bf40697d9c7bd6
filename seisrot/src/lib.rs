//! # seisrot
//!
//! Rotate three-component seismograms between the Cartesian frame of a
//! regional simulation (X, Y, Z) and the local geographic frame of each
//! station (North, East, Up/Z).
//!
//! Every station has its own 3x3 direction-cosine matrix, listed in a
//! rotation table. Rotation is a matrix product per station:
//!
//! - forward (`XYZ->NEZ`): `A · Rᵗ`
//! - inverse (`XYZ<-NEZ`): `A · R`
//!
//! where `A` is the `(nstep x 3)` amplitude matrix.
//!
//! ## Quick Start
//!
//! ```no_run
//! use seisrot::{AsciiSource, RotateConfig, RotationTable, Rotator, Result};
//!
//! fn main() -> Result<()> {
//!     let table = RotationTable::open("rotation_nu")?;
//!     let source = AsciiSource::new("OUTPUT_FILES")?;
//!
//!     let config = RotateConfig::new(
//!         "XYZ->NEZ".parse()?,
//!         "${nt}.${sta}.BX${comp}.semd".parse()?,
//!         "${nt}.${sta}.BX${comp}.sem.ascii".parse()?,
//!     )
//!     .output_dir("OUTPUT_FILES_sph");
//!
//!     let report = Rotator::new(&table, &source, config).run()?;
//!     for (station, error) in report.failures() {
//!         eprintln!("{}: {}", station, error);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Storage
//!
//! Source seismograms are read either from one ASCII file per station and
//! component ([`AsciiSource`]) or from a single HDF5 container
//! (`Hdf5Source`, feature `hdf5`). Output is always ASCII, formatted as
//! `%11.6f%19.7E`.
//!
//! ## Feature Flags
//!
//! - `hdf5`: read source seismograms from an HDF5 container (needs a native
//!   HDF5 library)

#![deny(missing_docs)]

// Modules
mod error;
pub mod format;
mod mode;
mod partition;
mod report;
mod rotate;
mod rotation;
mod series;
pub mod source;
mod table;
mod template;

// Public exports
pub use error::{Error, Result};
pub use mode::{ComponentSet, Direction, RotationMode, PLACEHOLDER};
pub use partition::Partition;
pub use report::{RunReport, StationOutcome, StationReport};
pub use rotate::{PlannedSource, RotateConfig, Rotator, StationPlan};
pub use rotation::RotationMatrix;
pub use series::{count_lines, TimeSeries};
pub use source::{open_source, AsciiSource, SeismogramSource, SourceFormat, DEFAULT_CONTAINER};
pub use table::{RotationTable, StationRecord};
pub use template::NameTemplate;

#[cfg(feature = "hdf5")]
pub use source::Hdf5Source;
