//! One text file per station and component.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::series::{count_lines, TimeSeries};

use super::SeismogramSource;

/// Reads two-column ASCII seismograms from a directory.
#[derive(Debug, Clone)]
pub struct AsciiSource {
    dir: PathBuf,
}

impl AsciiSource {
    /// Create a source rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OpenFailed`] if `dir` is not a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            let source = std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory");
            return Err(Error::open_failed(dir, source));
        }
        Ok(AsciiSource { dir })
    }

    /// Root directory of the source.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl SeismogramSource for AsciiSource {
    fn contains(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    fn sample_count(&self, name: &str) -> Result<usize> {
        count_lines(self.path(name))
    }

    fn load(&self, name: &str) -> Result<TimeSeries> {
        TimeSeries::read_ascii(self.path(name))
    }

    fn describe(&self, name: &str) -> String {
        self.path(name).display().to_string()
    }
}
