//! Tribology and contact-mechanics calculators.
//!
//! This crate provides tools for:
//! - Hertzian contact radius and maximum pressure of a ball on a flat
//! - Loading time/friction-force measurement files
//! - Grouping friction readings into cycles (fixed count or fixed size)
//! - Per-cycle coefficient of friction reports as tab-separated text
//! - Plotting exported reports as PNG charts
//!
//! # Example
//!
//! ```no_run
//! use tribo_calc::core::loaders::load_friction_file;
//! use tribo_calc::processors::friction::{analyze, PartitionStrategy};
//!
//! let series = load_friction_file("friction.txt").unwrap();
//! let analysis = analyze(&series, PartitionStrategy::FixedCount { num_cycles: 50 }, 1000.0).unwrap();
//! println!("{}", analysis.to_report());
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;
pub mod visualization;

pub use config::{CalculatorConfig, FrictionConfig, PlotConfig};
pub use crate::core::loaders::{FrictionSeries, Sample};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
