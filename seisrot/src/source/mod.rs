//! Storage backends for source seismograms.
//!
//! Sources are addressed by name: the rendered input template. The
//! [`AsciiSource`] maps names to files in a directory; the HDF5 source
//! (feature `hdf5`) maps names to datasets at the root of one container.

mod ascii;
#[cfg(feature = "hdf5")]
mod container;

use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::series::TimeSeries;

pub use ascii::AsciiSource;
#[cfg(feature = "hdf5")]
pub use container::Hdf5Source;

/// Default name of the HDF5 container inside the input directory.
pub const DEFAULT_CONTAINER: &str = "seismograms.h5";

/// Where source seismograms are read from.
///
/// Implementations are shared by all workers, so they must be
/// `Send + Sync`.
pub trait SeismogramSource: Send + Sync {
    /// Check whether a seismogram with this name exists.
    fn contains(&self, name: &str) -> bool;

    /// Number of samples in the named seismogram, without loading it.
    fn sample_count(&self, name: &str) -> Result<usize>;

    /// Load the named seismogram.
    fn load(&self, name: &str) -> Result<TimeSeries>;

    /// Human-readable location used in logs, such as a path.
    fn describe(&self, name: &str) -> String;
}

/// Storage format of the source seismograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// All components in one HDF5 container.
    #[default]
    Hdf5,
    /// One two-column text file per station and component.
    Ascii,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Hdf5 => f.write_str("h5"),
            SourceFormat::Ascii => f.write_str("ascii"),
        }
    }
}

/// Open the source for `format` rooted at `input_dir`.
///
/// `container` names the HDF5 file inside `input_dir` and is ignored for
/// ASCII input.
///
/// # Errors
///
/// - [`crate::Error::BackendUnavailable`] for HDF5 in a build without the `hdf5` feature
/// - [`crate::Error::OpenFailed`] if the directory or container cannot be opened
pub fn open_source(
    format: SourceFormat,
    input_dir: &Path,
    container: &str,
) -> Result<Box<dyn SeismogramSource>> {
    match format {
        SourceFormat::Ascii => Ok(Box::new(AsciiSource::new(input_dir)?)),
        #[cfg(feature = "hdf5")]
        SourceFormat::Hdf5 => Ok(Box::new(Hdf5Source::open(input_dir.join(container))?)),
        #[cfg(not(feature = "hdf5"))]
        SourceFormat::Hdf5 => {
            let _ = container;
            Err(crate::Error::backend_unavailable("HDF5", "hdf5"))
        }
    }
}
