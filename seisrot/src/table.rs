//! Rotation-matrix tables.
//!
//! A rotation table lists one record per station, four lines each:
//!
//! ```text
//! TS TS11
//!   0.9999  0.0000  0.0123
//!   0.0000  1.0000  0.0000
//!  -0.0123  0.0000  0.9999
//! ```
//!
//! The header names the network and station; the next three lines are the
//! N, E and Z rows of the station's [`RotationMatrix`].

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};
use crate::rotation::RotationMatrix;

/// Lines per station record.
const RECORD_LINES: usize = 4;

/// One station's entry in a rotation table.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    /// Network code.
    pub network: String,

    /// Station code.
    pub station: String,

    /// Rotation from the Cartesian to the geographic frame.
    pub matrix: RotationMatrix,
}

impl StationRecord {
    /// `network.station` label used in logs and reports.
    pub fn label(&self) -> String {
        format!("{}.{}", self.network, self.station)
    }
}

/// All station records of a rotation-matrix file, in file order.
#[derive(Debug, Clone, Default)]
pub struct RotationTable {
    records: Vec<StationRecord>,
    path: Option<PathBuf>,
}

impl RotationTable {
    /// Read and parse a rotation-matrix file.
    ///
    /// # Errors
    ///
    /// - [`Error::OpenFailed`] if the file cannot be read
    /// - [`Error::InvalidTable`] if a record is malformed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::open_failed(path, e))?;

        let mut table = Self::parse(&text)?;
        table.path = Some(path.to_path_buf());
        Ok(table)
    }

    /// Parse rotation-table text.
    ///
    /// Only complete four-line records are used; leftover lines at the end
    /// are ignored with a warning.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        let leftover = lines.len() % RECORD_LINES;
        if leftover != 0 {
            warn!(
                lines = leftover,
                "ignoring incomplete station record at end of rotation table"
            );
        }

        let records = lines
            .chunks_exact(RECORD_LINES)
            .enumerate()
            .map(|(i, chunk)| parse_record(chunk, i * RECORD_LINES + 1))
            .collect::<Result<Vec<_>>>()?;

        Ok(RotationTable {
            records,
            path: None,
        })
    }

    /// Number of station records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at station index `index`.
    pub fn get(&self, index: usize) -> Option<&StationRecord> {
        self.records.get(index)
    }

    /// Iterate over records in file order.
    pub fn iter(&self) -> impl Iterator<Item = &StationRecord> {
        self.records.iter()
    }

    /// Path the table was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Parse one four-line record starting at 1-based line `first_line`.
fn parse_record(chunk: &[&str], first_line: usize) -> Result<StationRecord> {
    let mut header = chunk[0].split_whitespace();
    let (network, station) = match (header.next(), header.next()) {
        (Some(nt), Some(sta)) => (nt.to_string(), sta.to_string()),
        _ => {
            return Err(Error::invalid_table(
                first_line,
                format!("expected 'network station', found '{}'", chunk[0].trim()),
            ))
        }
    };

    let mut rows = [[0.0; 3]; 3];
    for (i, row) in rows.iter_mut().enumerate() {
        let line_no = first_line + 1 + i;
        let mut values = chunk[i + 1].split_whitespace();
        for (j, slot) in row.iter_mut().enumerate() {
            let token = values.next().ok_or_else(|| {
                Error::invalid_table(line_no, format!("expected 3 values, found {}", j))
            })?;
            *slot = token.parse().map_err(|_| {
                Error::invalid_table(line_no, format!("'{}' is not a number", token))
            })?;
        }
    }

    Ok(StationRecord {
        network,
        station,
        matrix: RotationMatrix::from_rows(rows),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_STATIONS: &str = "\
TS TS11
 1.0 0.0 0.0
 0.0 1.0 0.0
 0.0 0.0 1.0
XX  A02   extra
 0.0 1.0 0.0
 -1.0 0.0 0.0
 0.0 0.0 1.0 9.9
";

    #[test]
    fn test_parse_two_stations() {
        let table = RotationTable::parse(TWO_STATIONS).unwrap();
        assert_eq!(table.len(), 2);

        let first = table.get(0).unwrap();
        assert_eq!(first.network, "TS");
        assert_eq!(first.station, "TS11");
        assert_eq!(first.matrix, RotationMatrix::identity());

        let second = table.get(1).unwrap();
        assert_eq!(second.label(), "XX.A02");
        assert_eq!(second.matrix.view()[[1, 0]], -1.0);
        assert!(table.path().is_none());
    }

    #[test]
    fn test_trailing_partial_record_ignored() {
        let text = format!("{}ZZ Z99\n 1 0 0\n", TWO_STATIONS);
        let table = RotationTable::parse(&text).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_table() {
        let table = RotationTable::parse("").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_bad_header() {
        let err = RotationTable::parse("TS\n1 0 0\n0 1 0\n0 0 1\n").unwrap_err();
        assert!(matches!(err, Error::InvalidTable { line: 1, .. }));
    }

    #[test]
    fn test_short_row_reports_line() {
        let text = "TS A\n1 0 0\n0 1 0\n0 0 1\nTS B\n1 0 0\n0 1\n0 0 1\n";
        let err = RotationTable::parse(text).unwrap_err();
        assert!(matches!(err, Error::InvalidTable { line: 7, .. }));
    }

    #[test]
    fn test_non_numeric_value() {
        let err = RotationTable::parse("TS A\n1 0 zero\n0 1 0\n0 0 1\n").unwrap_err();
        assert!(err.to_string().contains("'zero'"));
    }

    #[test]
    fn test_open_missing_file() {
        let err = RotationTable::open("/nonexistent/rotation_nu").unwrap_err();
        assert!(matches!(err, Error::OpenFailed { .. }));
    }
}
