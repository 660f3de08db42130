//! Online statistics for simulation output.
//!
//! - [`MeanVarCalculator`]: Running mean and sample variance per variable

pub mod mean_var;

pub use mean_var::MeanVarCalculator;
