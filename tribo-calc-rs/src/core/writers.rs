//! Report writers.
//!
//! Reports are rendered completely in memory and written with a single call,
//! so a failed run never leaves a truncated file behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use super::report::Report;

/// Errors that can occur during write operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to create parent directories.
    #[error("failed to create parent directories for '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or open file for writing.
    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write data to file.
    #[error("failed to write to file '{path}': {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for write operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Creates parent directories for a file path if they don't exist.
pub(crate) fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Write a rendered report as tab-separated text.
///
/// # Arguments
///
/// * `path` - Output file path (parent directories will be created if needed)
/// * `report` - Report to render
///
/// # Example
///
/// ```no_run
/// use tribo_calc::core::report::{Cell, Report};
/// use tribo_calc::core::writers::write_report;
/// use std::path::Path;
///
/// let mut report = Report::new(&["Cycle", "Max friction force (mN)"]);
/// report.push_row(vec![Cell::Index(1), Cell::Value(2.0)]);
/// write_report(Path::new("cof.txt"), &report).unwrap();
/// ```
pub fn write_report(path: &Path, report: &Report) -> Result<()> {
    let content = report.render();

    ensure_parent_dirs(path)?;

    let path_str = path.display().to_string();
    let file = File::create(path).map_err(|e| WriteError::CreateFile {
        path: path_str.clone(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(content.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| WriteError::WriteFile {
            path: path_str,
            source: e,
        })?;

    log::info!("Wrote {} report rows to {}", report.rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loaders::load_report;
    use crate::core::report::Cell;
    use std::fs;
    use tempfile::tempdir;

    fn create_test_report() -> Report {
        let mut report = Report::new(&["Averaged_Time", "Averaged_Friction"]);
        report.push_row(vec![Cell::Value(0.5), Cell::Value(1.5)]);
        report.push_row(vec![Cell::Value(2.5), Cell::Value(3.5)]);
        report
    }

    #[test]
    fn test_write_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.txt");

        write_report(&path, &create_test_report()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Averaged_Time\tAveraged_Friction\n0.500000\t1.500000\n2.500000\t3.500000"
        );
    }

    #[test]
    fn test_write_report_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("subdir").join("nested").join("report.txt");

        write_report(&path, &create_test_report()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_write_report_parent_is_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let result = write_report(&blocker.join("report.txt"), &create_test_report());
        assert!(result.is_err());
    }

    #[test]
    fn test_report_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("round_trip.txt");

        let values = [
            (0.123_456_7, 98.765_432_1),
            (-4.0, 1.0 / 3.0),
            (1234.5, 0.000_000_4),
        ];
        let mut report = Report::new(&["a", "b"]);
        for &(a, b) in &values {
            report.push_row(vec![Cell::Value(a), Cell::Value(b)]);
        }
        write_report(&path, &report).unwrap();

        let table = load_report(&path).unwrap();
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.len(), values.len());
        for (row, &(a, b)) in table.rows.iter().zip(values.iter()) {
            assert!((row[0] - a).abs() <= 1e-6);
            assert!((row[1] - b).abs() <= 1e-6);
        }
    }
}
