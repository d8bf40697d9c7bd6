//! All seismograms in one HDF5 container.
//!
//! Each station component is an `(nstep x 2)` dataset at the container
//! root holding time and amplitude columns.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use hdf5::File;
use tracing::debug;

use crate::error::{Error, Result};
use crate::series::TimeSeries;

use super::SeismogramSource;

/// Reads seismogram datasets from an HDF5 container.
///
/// Dataset names are listed once on open; each load reopens the file so the
/// source holds no library handles between calls.
#[derive(Debug, Clone)]
pub struct Hdf5Source {
    path: PathBuf,
    datasets: HashSet<String>,
}

impl Hdf5Source {
    /// Open a container and index its root datasets.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            let source = std::io::Error::new(std::io::ErrorKind::NotFound, "container not found");
            return Err(Error::open_failed(path, source));
        }

        let file = File::open(path)?;
        let datasets: HashSet<String> = file.member_names()?.into_iter().collect();
        debug!(path = %path.display(), datasets = datasets.len(), "opened HDF5 container");

        Ok(Hdf5Source {
            path: path.to_path_buf(),
            datasets,
        })
    }

    /// Path of the container.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of datasets at the container root.
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Check if the container root is empty.
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl SeismogramSource for Hdf5Source {
    fn contains(&self, name: &str) -> bool {
        self.datasets.contains(name)
    }

    fn sample_count(&self, name: &str) -> Result<usize> {
        let file = File::open(&self.path)?;
        let shape = file.dataset(name)?.shape();
        Ok(shape.first().copied().unwrap_or(0))
    }

    fn load(&self, name: &str) -> Result<TimeSeries> {
        let file = File::open(&self.path)?;
        let dataset = file.dataset(name)?;
        let shape = dataset.shape();

        let (rows, cols) = match shape.as_slice() {
            [rows, cols] => (*rows, *cols),
            _ => {
                return Err(Error::malformed_series(
                    &self.path,
                    0,
                    format!("dataset '{}' has shape {:?}, expected (nstep, 2)", name, shape),
                ))
            }
        };

        let data: Vec<f64> = dataset.read_raw()?;
        TimeSeries::from_row_major(&data, rows, cols)
    }

    fn describe(&self, name: &str) -> String {
        format!("{}:/{}", self.path.display(), name)
    }
}
