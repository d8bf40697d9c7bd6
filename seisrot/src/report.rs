//! Per-station outcomes and run summaries.

use std::path::PathBuf;

use crate::error::Error;

/// What happened to one station.
#[derive(Debug)]
pub enum StationOutcome {
    /// All target components were written.
    Rotated {
        /// Files written, in target component order.
        outputs: Vec<PathBuf>,
        /// Number of samples per component.
        samples: usize,
    },

    /// A required source was absent; nothing was written.
    Skipped {
        /// Location of the first missing source.
        missing: String,
    },

    /// Reading, rotating or writing failed.
    Failed {
        /// The error that stopped this station.
        error: Error,
    },
}

impl StationOutcome {
    /// Short status word for summaries.
    pub fn status(&self) -> &'static str {
        match self {
            StationOutcome::Rotated { .. } => "rotated",
            StationOutcome::Skipped { .. } => "skipped",
            StationOutcome::Failed { .. } => "failed",
        }
    }
}

/// Outcome of one station, with its position in the rotation table.
#[derive(Debug)]
pub struct StationReport {
    /// Station index in the rotation table.
    pub index: usize,

    /// `network.station` label.
    pub label: String,

    /// What happened.
    pub outcome: StationOutcome,
}

/// Outcomes of a whole run, ordered by station index.
#[derive(Debug, Default)]
pub struct RunReport {
    stations: Vec<StationReport>,
    workers: usize,
}

impl RunReport {
    pub(crate) fn new(mut stations: Vec<StationReport>, workers: usize) -> Self {
        stations.sort_by_key(|s| s.index);
        RunReport { stations, workers }
    }

    /// Number of workers the run used.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Number of stations processed.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Check if the run processed no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Iterate over station reports in table order.
    pub fn iter(&self) -> impl Iterator<Item = &StationReport> {
        self.stations.iter()
    }

    /// Number of stations whose outputs were written.
    pub fn rotated(&self) -> usize {
        self.count(|o| matches!(o, StationOutcome::Rotated { .. }))
    }

    /// Number of stations skipped for missing sources.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, StationOutcome::Skipped { .. }))
    }

    /// Number of stations that failed.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, StationOutcome::Failed { .. }))
    }

    /// Total output files written.
    pub fn files_written(&self) -> usize {
        self.stations
            .iter()
            .map(|s| match &s.outcome {
                StationOutcome::Rotated { outputs, .. } => outputs.len(),
                _ => 0,
            })
            .sum()
    }

    /// Failed stations with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.stations.iter().filter_map(|s| match &s.outcome {
            StationOutcome::Failed { error } => Some((s.label.as_str(), error)),
            _ => None,
        })
    }

    /// True when no station failed. Skipped stations do not count as failures.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&StationOutcome) -> bool) -> usize {
        self.stations.iter().filter(|s| pred(&s.outcome)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(index: usize, outcome: StationOutcome) -> StationReport {
        StationReport {
            index,
            label: format!("TS.S{}", index),
            outcome,
        }
    }

    #[test]
    fn test_counts_and_order() {
        let report = RunReport::new(
            vec![
                station(2, StationOutcome::Skipped { missing: "x".into() }),
                station(0, StationOutcome::Rotated {
                    outputs: vec!["a".into(), "b".into()],
                    samples: 10,
                }),
                station(1, StationOutcome::Failed {
                    error: Error::missing_source("y"),
                }),
            ],
            2,
        );

        assert_eq!(report.len(), 3);
        assert_eq!(report.rotated(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.files_written(), 2);
        assert!(!report.is_success());
        assert_eq!(report.iter().map(|s| s.index).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(report.failures().next().unwrap().0, "TS.S1");
    }

    #[test]
    fn test_skips_are_success() {
        let report = RunReport::new(
            vec![station(0, StationOutcome::Skipped { missing: "x".into() })],
            1,
        );
        assert!(report.is_success());
        assert_eq!(report.iter().next().unwrap().outcome.status(), "skipped");
    }
}
