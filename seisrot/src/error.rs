//! Error types for seismogram rotation.
//!
//! This module provides the [`Error`] enum covering all possible failure modes
//! when reading rotation tables and seismograms, along with a convenient
//! [`Result`] type alias.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rotation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rotating seismograms.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error from the underlying file system.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A file could not be opened.
    #[error("Failed to open {path}: {source}")]
    OpenFailed {
        /// Path to the file that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The rotation-matrix file is malformed.
    #[error("Invalid rotation table at line {line}: {reason}")]
    InvalidTable {
        /// 1-based line number of the offending line.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// The rotation mode string could not be parsed.
    #[error("Invalid rotation mode '{value}': {reason}")]
    InvalidMode {
        /// The rejected mode string.
        value: String,
        /// Description of the problem.
        reason: &'static str,
    },

    /// A file or dataset name template is malformed.
    #[error("Invalid name template '{template}': {reason}")]
    InvalidTemplate {
        /// The rejected template.
        template: String,
        /// Description of the problem.
        reason: String,
    },

    /// A seismogram file could not be parsed.
    #[error("Malformed seismogram {path} at line {line}: {reason}")]
    MalformedSeries {
        /// Path of the seismogram.
        path: PathBuf,
        /// 1-based line number (0 when the problem is not tied to a line).
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// The components of one station have different numbers of samples.
    #[error("Length mismatch for {station}: {name} has {found} samples, expected {expected}")]
    LengthMismatch {
        /// `network.station` of the affected station.
        station: String,
        /// Name of the mismatching component record.
        name: String,
        /// Expected number of samples.
        expected: usize,
        /// Actual number of samples.
        found: usize,
    },

    /// An amplitude matrix does not have three columns.
    #[error("Invalid amplitude matrix dimensions: {rows}x{cols} (expected Nx3)")]
    InvalidDimensions {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Source data required by the rotation does not exist.
    #[error("Missing source data: {name}")]
    MissingSource {
        /// File or dataset name.
        name: String,
    },

    /// The requested storage backend was not compiled in.
    #[error("{backend} support is not enabled (rebuild with `--features {feature}`)")]
    BackendUnavailable {
        /// Human-readable backend name.
        backend: &'static str,
        /// Cargo feature that enables it.
        feature: &'static str,
    },

    /// Error reported by the HDF5 library.
    #[cfg(feature = "hdf5")]
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    /// The worker pool could not be created.
    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// A worker panicked while processing its share of stations.
    #[error("Worker {rank} panicked")]
    WorkerPanicked {
        /// Rank of the failing worker.
        rank: usize,
    },
}

impl Error {
    /// Create an OpenFailed error for the given path.
    pub fn open_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::OpenFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an InvalidTable error.
    pub fn invalid_table(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidTable {
            line,
            reason: reason.into(),
        }
    }

    /// Create an InvalidMode error.
    pub fn invalid_mode(value: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidMode {
            value: value.into(),
            reason,
        }
    }

    /// Create an InvalidTemplate error.
    pub fn invalid_template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Create a MalformedSeries error.
    pub fn malformed_series(
        path: impl Into<PathBuf>,
        line: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedSeries {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Create a MissingSource error.
    pub fn missing_source(name: impl Into<String>) -> Self {
        Self::MissingSource { name: name.into() }
    }

    /// Create a BackendUnavailable error.
    pub const fn backend_unavailable(backend: &'static str, feature: &'static str) -> Self {
        Self::BackendUnavailable { backend, feature }
    }
}
