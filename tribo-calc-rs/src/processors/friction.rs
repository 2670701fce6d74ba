//! Coefficient-of-friction post-processing.
//!
//! A friction series is split into cycles with one of two strategies:
//!
//! - [`PartitionStrategy::FixedCount`]: exactly N cycles, remainder samples
//!   go to the first cycles; each cycle reports its peak |friction|.
//! - [`PartitionStrategy::FixedSize`]: cycles of S points, the last one may be
//!   shorter; each cycle reports its mean time and mean |friction|.
//!
//! Either way the coefficient of friction is `friction / normal_force`, with
//! both forces in mN.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::loaders::{load_friction_file, FrictionSeries, LoaderError};
use crate::core::report::{Cell, Report};
use crate::core::transforms::{average_over_cycles, max_abs, mean, partition_fixed_count, DomainError};
use crate::core::writers::{write_report, WriteError};

/// Header of the cycle-max report.
pub const MAX_HEADER: [&str; 3] = [
    "Cycle",
    "Max friction force (mN)",
    "Max Coefficient of Friction",
];

/// Header of the cycle-average report.
pub const AVERAGE_HEADER: [&str; 3] = [
    "Averaged_Time",
    "Averaged_Friction",
    "Averaged_Coefficient_of_Friction",
];

/// Broad classes of failure for a friction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File missing, unreadable or unwritable.
    Io,
    /// Malformed or empty input.
    Format,
    /// Parameter outside its valid range.
    Domain,
}

/// Errors from an end-to-end friction run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to load friction data: {0}")]
    Load(#[from] LoaderError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to export report: {0}")]
    Write(#[from] WriteError),
}

impl AnalysisError {
    /// Classifies the error as an IO, format or domain failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::Load(LoaderError::Io(_)) => ErrorKind::Io,
            AnalysisError::Load(_) => ErrorKind::Format,
            AnalysisError::Domain(_) => ErrorKind::Domain,
            AnalysisError::Write(_) => ErrorKind::Io,
        }
    }
}

/// How a series is grouped into cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionStrategy {
    /// Exactly `num_cycles` cycles.
    FixedCount { num_cycles: usize },
    /// Cycles of `cycle_size` points.
    FixedSize { cycle_size: usize },
}

/// Per-cycle outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleResult {
    /// Peak friction of a fixed-count cycle.
    Max {
        /// 1-based cycle number
        cycle: usize,
        max_friction: f64,
        coefficient: f64,
    },
    /// Averages of a fixed-size cycle.
    Averaged {
        time: f64,
        friction: f64,
        coefficient: f64,
    },
}

impl CycleResult {
    pub fn coefficient(&self) -> f64 {
        match *self {
            CycleResult::Max { coefficient, .. } | CycleResult::Averaged { coefficient, .. } => {
                coefficient
            }
        }
    }

    fn cells(&self) -> Vec<Cell> {
        match *self {
            CycleResult::Max {
                cycle,
                max_friction,
                coefficient,
            } => vec![
                Cell::Index(cycle),
                Cell::Value(max_friction),
                Cell::Value(coefficient),
            ],
            CycleResult::Averaged {
                time,
                friction,
                coefficient,
            } => vec![
                Cell::Value(time),
                Cell::Value(friction),
                Cell::Value(coefficient),
            ],
        }
    }
}

/// Outcome of processing one friction series.
#[derive(Debug, Clone, PartialEq)]
pub struct FrictionAnalysis {
    pub strategy: PartitionStrategy,
    /// Normal force in mN
    pub normal_force: f64,
    pub sample_count: usize,
    pub cycles: Vec<CycleResult>,
}

impl FrictionAnalysis {
    /// Coefficient of friction of every cycle, in cycle order.
    pub fn coefficients(&self) -> Vec<f64> {
        self.cycles.iter().map(CycleResult::coefficient).collect()
    }

    /// Mean coefficient over all cycles.
    pub fn mean_coefficient(&self) -> Option<f64> {
        mean(&self.coefficients())
    }

    /// Largest coefficient over all cycles.
    pub fn max_coefficient(&self) -> Option<f64> {
        self.cycles
            .iter()
            .map(CycleResult::coefficient)
            .fold(None, |acc, c| Some(acc.map_or(c, |m: f64| m.max(c))))
    }

    /// Build the tab-separated report for this analysis.
    pub fn to_report(&self) -> Report {
        let header = match self.strategy {
            PartitionStrategy::FixedCount { .. } => MAX_HEADER,
            PartitionStrategy::FixedSize { .. } => AVERAGE_HEADER,
        };
        let mut report = Report::new(&header);
        for cycle in &self.cycles {
            report.push_row(cycle.cells());
        }
        report
    }
}

/// Ratio of friction force to normal force.
///
/// # Errors
///
/// [`DomainError::ZeroNormalForce`] when `normal_force` is zero.
pub fn coefficient_of_friction(friction_force: f64, normal_force: f64) -> Result<f64, DomainError> {
    if normal_force == 0.0 {
        return Err(DomainError::ZeroNormalForce);
    }
    Ok(friction_force / normal_force)
}

/// Peak |friction| and its coefficient for each of `num_cycles` cycles.
pub fn max_per_cycle(
    series: &FrictionSeries,
    num_cycles: usize,
    normal_force: f64,
) -> Result<Vec<CycleResult>, DomainError> {
    partition_fixed_count(&series.frictions, num_cycles)?
        .into_iter()
        .enumerate()
        .map(|(i, group)| -> Result<CycleResult, DomainError> {
            let max_friction = max_abs(group);
            Ok(CycleResult::Max {
                cycle: i + 1,
                max_friction,
                coefficient: coefficient_of_friction(max_friction, normal_force)?,
            })
        })
        .collect()
}

/// Mean time, mean |friction| and coefficient for consecutive groups of `cycle_size` points.
pub fn average_per_cycle(
    series: &FrictionSeries,
    cycle_size: usize,
    normal_force: f64,
) -> Result<Vec<CycleResult>, DomainError> {
    let abs_frictions: Vec<f64> = series.frictions.iter().map(|f| f.abs()).collect();
    let averaged_friction = average_over_cycles(&abs_frictions, cycle_size)?;
    let averaged_times = average_over_cycles(&series.times, cycle_size)?;

    averaged_times
        .into_iter()
        .zip(averaged_friction)
        .map(|(time, friction)| -> Result<CycleResult, DomainError> {
            Ok(CycleResult::Averaged {
                time,
                friction,
                coefficient: coefficient_of_friction(friction.abs(), normal_force)?,
            })
        })
        .collect()
}

/// Group `series` into cycles and compute the coefficient of friction of each.
pub fn analyze(
    series: &FrictionSeries,
    strategy: PartitionStrategy,
    normal_force: f64,
) -> Result<FrictionAnalysis, DomainError> {
    let cycles = match strategy {
        PartitionStrategy::FixedCount { num_cycles } => {
            max_per_cycle(series, num_cycles, normal_force)?
        }
        PartitionStrategy::FixedSize { cycle_size } => {
            average_per_cycle(series, cycle_size, normal_force)?
        }
    };

    log::info!(
        "Processed {} samples into {} cycles ({:?})",
        series.len(),
        cycles.len(),
        strategy
    );

    Ok(FrictionAnalysis {
        strategy,
        normal_force,
        sample_count: series.len(),
        cycles,
    })
}

/// Load `input`, analyze it and write the report to `output`.
///
/// The report is only written once every cycle has been computed, so any
/// failure leaves `output` untouched.
pub fn run_friction_analysis(
    input: &Path,
    output: &Path,
    strategy: PartitionStrategy,
    normal_force: f64,
) -> Result<FrictionAnalysis, AnalysisError> {
    let series = load_friction_file(input)?;
    let analysis = analyze(&series, strategy, normal_force)?;
    write_report(output, &analysis.to_report())?;
    Ok(analysis)
}

/// Report path next to `input`: `<stem><suffix>.txt`.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "friction".to_string());
    input.with_file_name(format!("{}{}.txt", stem, suffix))
}
