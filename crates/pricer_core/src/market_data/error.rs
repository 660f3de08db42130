//! Market data error types.
//!
//! This module provides structured error handling for market data operations
//! including yield curve and volatility lookups and registry resolution.

use crate::types::PricingError;
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `InvalidMaturity`: Negative time or reversed time interval
/// - `InvalidInput`: Malformed construction data (non-increasing pillars, bad values)
/// - `InsufficientData`: Not enough data points for construction
/// - `NotFound`: Name or tag not present in the market store
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity (negative time or reversed interval).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Malformed construction data.
    #[error("Invalid market data input: {0}")]
    InvalidInput(String),

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Unresolved registry reference.
    #[error("Market object not found: {kind} '{name}'")]
    NotFound {
        /// Registry the lookup was made against
        kind: &'static str,
        /// The name or tag that failed to resolve
        name: String,
    },
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::NotFound { .. } => PricingError::MarketDataNotFound(err.to_string()),
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}
