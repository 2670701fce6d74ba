//! Coefficient-of-friction plots.
//!
//! Renders an exported report as a PNG line chart using the plotters library:
//! the first report column (cycle number or averaged time) on the x axis and
//! the last column (coefficient of friction) on the y axis.

use std::path::Path;

use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use thiserror::Error;

use crate::config::PlotConfig;
use crate::core::loaders::ReportTable;
use crate::core::writers::{ensure_parent_dirs, WriteError};

/// Errors that can occur during visualization.
#[derive(Error, Debug)]
pub enum VisualizationError {
    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("Plotting error: {0}")]
    PlottingError(String),

    #[error("Report has no rows to plot")]
    EmptyReport,

    #[error("Report needs at least two columns, found {0}")]
    TooFewColumns(usize),
}

/// Result type for visualization operations.
pub type Result<T> = std::result::Result<T, VisualizationError>;

/// Line and marker color.
const SERIES_COLOR: RGBColor = RGBColor(55, 126, 184);

/// Plot the coefficient of friction from `table` and save it as PNG.
///
/// Rows containing a non-finite x or y value are skipped.
pub fn plot_report(output_path: &Path, table: &ReportTable, config: &PlotConfig) -> Result<()> {
    let points = report_points(table)?;

    let (x_min, x_max, y_min, y_max) = compute_bounds(&points);
    let x_padding = (x_max - x_min) * 0.05;
    let y_padding = (y_max - y_min) * 0.05;

    ensure_parent_dirs(output_path)?;

    let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();

    root.fill(&WHITE).map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    // No label areas: the bitmap backend is built without a font renderer.
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(
            (x_min - x_padding)..(x_max + x_padding),
            (y_min - y_padding)..(y_max + y_padding),
        )
        .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .draw()
        .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &SERIES_COLOR))
        .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    let radius = config.point_radius;
    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), radius, SERIES_COLOR.filled())),
        )
        .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    root.present().map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    log::info!("Plotted {} points to {}", points.len(), output_path.display());
    Ok(())
}

/// Extract (first column, last column) pairs from the report.
fn report_points(table: &ReportTable) -> Result<Vec<(f64, f64)>> {
    if table.columns.len() < 2 {
        return Err(VisualizationError::TooFewColumns(table.columns.len()));
    }
    let last = table.columns.len() - 1;

    let points: Vec<(f64, f64)> = table
        .rows
        .iter()
        .filter_map(|row| Some((*row.first()?, *row.get(last)?)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();

    if points.is_empty() {
        return Err(VisualizationError::EmptyReport);
    }
    Ok(points)
}

/// Compute the bounds (min/max) for x and y coordinates.
fn compute_bounds(points: &[(f64, f64)]) -> (f64, f64, f64, f64) {
    let mut x_min = f64::MAX;
    let mut x_max = f64::MIN;
    let mut y_min = f64::MAX;
    let mut y_max = f64::MIN;

    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if (x_max - x_min).abs() < f64::EPSILON {
        x_min -= 1.0;
        x_max += 1.0;
    }
    if (y_max - y_min).abs() < f64::EPSILON {
        y_min -= 1.0;
        y_max += 1.0;
    }

    (x_min, x_max, y_min, y_max)
}
