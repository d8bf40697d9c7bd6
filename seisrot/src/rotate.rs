//! Station-by-station seismogram rotation.
//!
//! [`Rotator`] combines a [`RotationTable`], a [`SeismogramSource`] and a
//! [`RotateConfig`]. For each station it loads the source components,
//! rotates the `(nstep x 3)` amplitude matrix and writes one ASCII file per
//! target component.
//!
//! # Example
//!
//! ```no_run
//! use seisrot::{AsciiSource, RotateConfig, RotationTable, Rotator};
//!
//! let table = RotationTable::open("rotation_nu")?;
//! let source = AsciiSource::new("OUTPUT_FILES")?;
//! let config = RotateConfig::new(
//!     "XYZ->NEZ".parse()?,
//!     "${nt}.${sta}.BX${comp}.semd".parse()?,
//!     "${nt}.${sta}.BX${comp}.sem.ascii".parse()?,
//! )
//! .output_dir("OUTPUT_FILES_sph")
//! .workers(4);
//!
//! let report = Rotator::new(&table, &source, config).run()?;
//! println!("{} stations rotated", report.rotated());
//! # Ok::<(), seisrot::Error>(())
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::mode::RotationMode;
use crate::partition::Partition;
use crate::report::{RunReport, StationOutcome, StationReport};
use crate::series::{ensure_dir, TimeSeries};
use crate::source::SeismogramSource;
use crate::table::{RotationTable, StationRecord};
use crate::template::NameTemplate;

/// Settings for a rotation run.
#[derive(Debug, Clone)]
pub struct RotateConfig {
    /// Direction and component labels.
    pub mode: RotationMode,

    /// Template naming source seismograms.
    pub input_template: NameTemplate,

    /// Template naming output files.
    pub output_template: NameTemplate,

    /// Directory output files are written to.
    pub output_dir: PathBuf,

    /// Number of workers.
    pub workers: usize,
}

impl RotateConfig {
    /// Create a configuration writing to the current directory with one worker.
    pub fn new(
        mode: RotationMode,
        input_template: NameTemplate,
        output_template: NameTemplate,
    ) -> Self {
        RotateConfig {
            mode,
            input_template,
            output_template,
            output_dir: PathBuf::from("."),
            workers: 1,
        }
    }

    /// Set the output directory.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the number of workers (at least one is always used).
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Check that the output template gives each target component its own file.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTemplate`] if the mode writes more than one component
    /// and the output template does not mention `comp`.
    pub fn validate(&self) -> Result<()> {
        if self.mode.target().count() > 1 && !self.output_template.uses_component() {
            return Err(Error::invalid_template(
                self.output_template.as_str(),
                format!(
                    "mode {} writes {} components but the template has no ${{comp}}",
                    self.mode,
                    self.mode.target().count()
                ),
            ));
        }
        Ok(())
    }
}

/// A source seismogram a station needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSource {
    /// Component label.
    pub component: char,

    /// Rendered input name.
    pub name: String,

    /// Backend location (path or container dataset).
    pub location: String,

    /// Whether the source exists.
    pub exists: bool,

    /// Sample count, when the source exists and could be sized.
    pub samples: Option<usize>,
}

/// What a station would read and write.
#[derive(Debug, Clone, PartialEq)]
pub struct StationPlan {
    /// Station index in the rotation table.
    pub index: usize,

    /// `network.station` label.
    pub label: String,

    /// Sources in column order.
    pub sources: Vec<PlannedSource>,

    /// Output files in column order.
    pub targets: Vec<PathBuf>,
}

impl StationPlan {
    /// True when every source exists, so the station would be rotated.
    pub fn is_complete(&self) -> bool {
        self.sources.iter().all(|s| s.exists)
    }
}

/// Rotates every station of a table.
pub struct Rotator<'a> {
    table: &'a RotationTable,
    source: &'a dyn SeismogramSource,
    config: RotateConfig,
}

impl<'a> Rotator<'a> {
    /// Create a rotator.
    pub fn new(
        table: &'a RotationTable,
        source: &'a dyn SeismogramSource,
        config: RotateConfig,
    ) -> Self {
        Rotator {
            table,
            source,
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &RotateConfig {
        &self.config
    }

    /// Describe what station `index` would read and write.
    pub fn plan(&self, index: usize) -> Option<StationPlan> {
        let record = self.table.get(index)?;

        let sources = self
            .config
            .mode
            .source()
            .present()
            .map(|(_, comp)| {
                let name = self.input_name(record, comp);
                let exists = self.source.contains(&name);
                let samples = if exists {
                    self.source.sample_count(&name).ok()
                } else {
                    None
                };
                PlannedSource {
                    component: comp,
                    location: self.source.describe(&name),
                    name,
                    exists,
                    samples,
                }
            })
            .collect();

        let targets = self
            .config
            .mode
            .target()
            .present()
            .map(|(_, comp)| self.output_path(record, comp))
            .collect();

        Some(StationPlan {
            index,
            label: record.label(),
            sources,
            targets,
        })
    }

    /// Plans for every station, in table order.
    pub fn plan_all(&self) -> Vec<StationPlan> {
        (0..self.table.len()).filter_map(|i| self.plan(i)).collect()
    }

    /// Rotate a single station.
    ///
    /// Returns `None` if `index` is outside the table. Missing sources give
    /// [`StationOutcome::Skipped`]; any other problem gives
    /// [`StationOutcome::Failed`].
    pub fn rotate_station(&self, index: usize) -> Option<StationReport> {
        let record = self.table.get(index)?;
        let label = record.label();

        let outcome = match self.try_rotate(record) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(station = %label, error = %error, "station failed");
                StationOutcome::Failed { error }
            }
        };

        Some(StationReport {
            index,
            label,
            outcome,
        })
    }

    /// Rotate every station, spreading them round-robin over the workers.
    ///
    /// Returns once all workers have finished.
    ///
    /// # Errors
    ///
    /// Only run-level problems are errors: the output template would send
    /// several components to one file, the output directory cannot be
    /// created, the worker pool cannot start, or a worker panics. Station
    /// problems are recorded in the report.
    pub fn run(&self) -> Result<RunReport> {
        self.config.validate()?;
        ensure_dir(&self.config.output_dir)?;

        let workers = self.config.workers.max(1);
        let total = self.table.len();

        info!(
            stations = total,
            workers,
            mode = %self.config.mode,
            "rotating seismograms"
        );

        let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;
        let partitions: Vec<Partition> = Partition::all(workers).collect();

        let shares: Vec<Result<Vec<StationReport>>> = pool.install(|| {
            partitions
                .into_par_iter()
                .map(|partition| {
                    panic::catch_unwind(AssertUnwindSafe(|| self.run_partition(partition, total)))
                        .map_err(|_| Error::WorkerPanicked {
                            rank: partition.rank(),
                        })
                })
                .collect()
        });

        let mut stations = Vec::with_capacity(total);
        for share in shares {
            stations.extend(share?);
        }

        let report = RunReport::new(stations, workers);
        info!(
            rotated = report.rotated(),
            skipped = report.skipped(),
            failed = report.failed(),
            files = report.files_written(),
            "rotation finished"
        );

        Ok(report)
    }

    fn run_partition(&self, partition: Partition, total: usize) -> Vec<StationReport> {
        debug!(
            rank = partition.rank(),
            stations = partition.local_count(total),
            "worker started"
        );
        partition
            .indices(total)
            .filter_map(|index| self.rotate_station(index))
            .collect()
    }

    fn try_rotate(&self, record: &StationRecord) -> Result<StationOutcome> {
        let mode = &self.config.mode;

        let mut names = Vec::with_capacity(3);
        for (column, comp) in mode.source().present() {
            let name = self.input_name(record, comp);
            if !self.source.contains(&name) {
                let missing = self.source.describe(&name);
                warn!(
                    station = %record.label(),
                    missing = %missing,
                    "source does not exist but is required by rotation, skipping station"
                );
                return Ok(StationOutcome::Skipped { missing });
            }
            names.push((column, name));
        }

        let mut time: Option<Array1<f64>> = None;
        let mut amplitudes = Array2::<f64>::zeros((0, 3));

        for (column, name) in &names {
            debug!(source = %self.source.describe(name), "reading");
            let series = self.source.load(name)?;

            match time.as_ref().map(|t| t.len()) {
                None => {
                    amplitudes = Array2::zeros((series.len(), 3));
                    time = Some(series.time().to_owned());
                }
                Some(expected) if expected != series.len() => {
                    return Err(Error::LengthMismatch {
                        station: record.label(),
                        name: name.clone(),
                        expected,
                        found: series.len(),
                    });
                }
                Some(_) => {}
            }

            amplitudes.column_mut(*column).assign(&series.amplitude());
        }

        // The mode guarantees at least one source component.
        let time = time.ok_or_else(|| Error::missing_source(record.label()))?;
        let rotated = record.matrix.apply(&amplitudes, mode.direction())?;

        let mut outputs = Vec::with_capacity(3);
        for (column, comp) in mode.target().present() {
            let path = self.output_path(record, comp);
            debug!(target = %path.display(), "writing");

            let series = TimeSeries::new(time.clone(), rotated.column(column).to_owned())?;
            series.write_ascii(&path)?;
            outputs.push(path);
        }

        Ok(StationOutcome::Rotated {
            outputs,
            samples: time.len(),
        })
    }

    fn input_name(&self, record: &StationRecord, comp: char) -> String {
        self.config
            .input_template
            .render(&record.network, &record.station, comp)
    }

    fn output_path(&self, record: &StationRecord, comp: char) -> PathBuf {
        let name = self
            .config
            .output_template
            .render(&record.network, &record.station, comp);
        Path::new(&self.config.output_dir).join(name)
    }
}
