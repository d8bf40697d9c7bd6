//! Two-column seismogram time series.
//!
//! A [`TimeSeries`] holds `(time, amplitude)` samples. ASCII seismograms
//! store one sample per line; extra columns are ignored on read.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use ndarray::{Array1, ArrayView1};

use crate::error::{Error, Result};
use crate::format::format_sample;

/// Read buffer size for line counting.
const COUNT_CHUNK: usize = 1024 * 1024;

/// A single-component seismogram.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    time: Array1<f64>,
    amplitude: Array1<f64>,
}

impl TimeSeries {
    /// Build a series from its two columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the columns differ in length.
    pub fn new(time: Array1<f64>, amplitude: Array1<f64>) -> Result<Self> {
        if time.len() != amplitude.len() {
            return Err(Error::InvalidDimensions {
                rows: time.len(),
                cols: amplitude.len(),
            });
        }
        Ok(TimeSeries { time, amplitude })
    }

    /// Build a series from row-major `(rows x cols)` data, using the first
    /// column as time and the second as amplitude.
    pub fn from_row_major(data: &[f64], rows: usize, cols: usize) -> Result<Self> {
        if cols < 2 || data.len() != rows * cols {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let time = data.iter().step_by(cols).copied().collect();
        let amplitude = data.iter().skip(1).step_by(cols).copied().collect();
        Ok(TimeSeries { time, amplitude })
    }

    /// Read an ASCII seismogram.
    ///
    /// Blank lines and `#` comments are skipped. Every other line must
    /// start with two numbers.
    pub fn read_ascii(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::open_failed(path, e))?;

        let mut time = Vec::new();
        let mut amplitude = Vec::new();

        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            let content = line.split('#').next().unwrap_or("");
            let mut fields = content.split_whitespace();

            let Some(first) = fields.next() else {
                continue;
            };
            let second = fields.next().ok_or_else(|| {
                Error::malformed_series(path, i + 1, "expected 2 columns, found 1")
            })?;

            time.push(parse_value(first, path, i + 1)?);
            amplitude.push(parse_value(second, path, i + 1)?);
        }

        Ok(TimeSeries {
            time: Array1::from_vec(time),
            amplitude: Array1::from_vec(amplitude),
        })
    }

    /// Write the series in the fixed-width ASCII layout.
    pub fn write_ascii(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::open_failed(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the series in the fixed-width ASCII layout to any writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for (&t, &a) in self.time.iter().zip(self.amplitude.iter()) {
            writeln!(writer, "{}", format_sample(t, a))?;
        }
        Ok(())
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Check if the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// The time column.
    pub fn time(&self) -> ArrayView1<'_, f64> {
        self.time.view()
    }

    /// The amplitude column.
    pub fn amplitude(&self) -> ArrayView1<'_, f64> {
        self.amplitude.view()
    }
}

fn parse_value(token: &str, path: &Path, line: usize) -> Result<f64> {
    token
        .parse()
        .map_err(|_| Error::malformed_series(path, line, format!("'{}' is not a number", token)))
}

/// Count lines in a file without parsing it.
///
/// A final line without a trailing newline still counts.
pub fn count_lines(path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| Error::open_failed(path, e))?;

    let mut buf = vec![0u8; COUNT_CHUNK];
    let mut count = 0;
    let mut last = None;

    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        count += buf[..n].iter().filter(|&&b| b == b'\n').count();
        last = Some(buf[n - 1]);
    }

    if matches!(last, Some(b) if b != b'\n') {
        count += 1;
    }

    Ok(count)
}

/// Create `dir` and its parents if needed.
pub fn ensure_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::open_failed(dir, e))
}
