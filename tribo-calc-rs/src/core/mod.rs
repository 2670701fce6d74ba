//! Core data types and I/O operations.

pub mod loaders;
pub mod report;
pub mod transforms;
pub mod writers;

pub use loaders::{load_friction_file, load_report, FrictionSeries, LoaderError, ReportTable, Sample};
pub use report::{Cell, Report};
pub use transforms::DomainError;
pub use writers::{write_report, WriteError};
