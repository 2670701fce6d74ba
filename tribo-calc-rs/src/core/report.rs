//! Tab-separated report model.

use std::fmt;

/// Decimal places used for every numeric report field.
pub const REPORT_DECIMALS: usize = 6;

/// A single report field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// 1-based cycle number, printed as an integer.
    Index(usize),
    /// Numeric value, printed with [`REPORT_DECIMALS`] decimals.
    Value(f64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Index(i) => write!(f, "{}", i),
            Cell::Value(v) => write!(f, "{:.*}", REPORT_DECIMALS, v),
        }
    }
}

/// Header plus ordered rows, rendered as tab-separated text.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Report {
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len(), "row width must match header");
        self.rows.push(row);
    }

    /// Render header and rows joined by newlines, fields joined by tabs.
    ///
    /// No trailing newline is emitted after the last row.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.columns.join("\t"));
        for row in &self.rows {
            let fields: Vec<String> = row.iter().map(Cell::to_string).collect();
            lines.push(fields.join("\t"));
        }
        lines.join("\n")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
