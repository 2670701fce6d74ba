//! Calculators built on the core types.

pub mod contact;
pub mod friction;

// Re-export key types for convenience
pub use contact::{equivalent_modulus, hertz_contact, ContactError, ContactInputs, ContactResult};
pub use friction::{
    analyze, coefficient_of_friction, run_friction_analysis, AnalysisError, CycleResult, ErrorKind,
    FrictionAnalysis, PartitionStrategy,
};
