//! Numerical building blocks.
//!
//! - [`distributions`]: Standard normal CDF, PDF and inverse CDF
//! - [`matrix`]: Dense row-major matrix used for simulated paths and statistics

pub mod distributions;
pub mod matrix;

pub use matrix::{Matrix, PathMatrix};
