//! Data loaders for friction measurement files and exported reports.
//!
//! This module provides parsers for:
//! - Whitespace-delimited time/friction-force text files (at least two columns)
//! - Tab-separated coefficient-of-friction reports written by [`crate::core::writers`]

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;

/// Errors that can occur during file loading.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Empty file: {0}")]
    EmptyFile(PathBuf),

    #[error("{path}:{line}: {reason}", path = .path.display())]
    Format {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// A single friction reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Time stamp in the instrument's units.
    pub time: f64,
    /// Friction force in mN.
    pub friction: f64,
}

/// Chronologically ordered friction readings.
#[derive(Debug, Clone, Default)]
pub struct FrictionSeries {
    /// Time value of each reading.
    pub times: Vec<f64>,
    /// Friction force (mN) of each reading.
    pub frictions: Vec<f64>,
    /// Source file path.
    pub source_path: Option<PathBuf>,
}

impl FrictionSeries {
    /// Creates a new empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from samples, keeping their order.
    pub fn from_samples(samples: &[Sample]) -> Self {
        Self {
            times: samples.iter().map(|s| s.time).collect(),
            frictions: samples.iter().map(|s| s.friction).collect(),
            source_path: None,
        }
    }

    /// Returns the number of readings.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if the series holds no readings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Appends a reading.
    #[inline]
    pub fn push(&mut self, time: f64, friction: f64) {
        self.times.push(time);
        self.frictions.push(friction);
    }

    /// Iterates over the readings in order.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.times
            .iter()
            .zip(self.frictions.iter())
            .map(|(&time, &friction)| Sample { time, friction })
    }
}

/// Load a friction measurement file.
///
/// Each non-blank line must hold at least two whitespace-separated numbers:
/// time followed by friction force. Further columns are ignored and blank
/// lines are skipped.
///
/// # Errors
///
/// - [`LoaderError::Io`] if the file cannot be opened or read
/// - [`LoaderError::Format`] for a line with fewer than two columns, a
///   non-numeric time/friction field or bytes that are not UTF-8
/// - [`LoaderError::EmptyFile`] if no readings were found
pub fn load_friction_file<P: AsRef<Path>>(path: P) -> Result<FrictionSeries> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut series = FrictionSeries::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => LoaderError::Format {
                path: path.to_path_buf(),
                line: line_no,
                reason: "line is not valid UTF-8 text".to_string(),
            },
            _ => LoaderError::Io(e),
        })?;

        let mut fields = line.split_whitespace();
        let Some(time_str) = fields.next() else {
            continue;
        };
        let friction_str = fields.next().ok_or_else(|| LoaderError::Format {
            path: path.to_path_buf(),
            line: line_no,
            reason: "each line must have at least two columns: time and friction".to_string(),
        })?;

        let time = parse_field(path, line_no, "time", time_str)?;
        let friction = parse_field(path, line_no, "friction", friction_str)?;
        series.push(time, friction);
    }

    if series.is_empty() {
        return Err(LoaderError::EmptyFile(path.to_path_buf()));
    }

    log::debug!("Loaded {} friction samples from {}", series.len(), path.display());
    series.source_path = Some(path.to_path_buf());
    Ok(series)
}

fn parse_field(path: &Path, line: usize, name: &str, value: &str) -> Result<f64> {
    value.parse().map_err(|_| LoaderError::Format {
        path: path.to_path_buf(),
        line,
        reason: format!("invalid {} value: {}", name, value),
    })
}

/// A report read back from disk: column names plus numeric rows.
#[derive(Debug, Clone, Default)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl ReportTable {
    /// Returns the values of one column, in row order.
    pub fn column(&self, idx: usize) -> Vec<f64> {
        self.rows.iter().filter_map(|row| row.get(idx).copied()).collect()
    }

    /// Returns the number of data rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no data rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Load a tab-separated coefficient-of-friction report.
///
/// The first line is taken as the header; every following line must contain
/// only numeric fields.
pub fn load_report<P: AsRef<Path>>(path: P) -> Result<ReportTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
        return Err(LoaderError::EmptyFile(path.to_path_buf()));
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // header is line 1
        let line_no = idx + 2;
        let row = record
            .iter()
            .map(|field| parse_field(path, line_no, "report", field.trim()))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    Ok(ReportTable { columns, rows })
}
