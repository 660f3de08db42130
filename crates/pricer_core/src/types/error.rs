//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Top-level error category for pricing operations. Every
//!   layer's specific error converts into it, so callers that only care about
//!   the broad failure class can use a single type.

use std::fmt;

/// Categorised pricing errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode. Degenerate numerics (zero
/// volatility, zero time to expiry, singular regressions) resolve to their
/// limiting values and never surface as errors.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `MarketDataNotFound`: A named market object could not be resolved
/// - `Configuration`: Bad simulation configuration
/// - `UnsupportedInstrument`: Operation not supported by the contract
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Unresolved market-data reference
    MarketDataNotFound(String),

    /// Invalid simulation configuration
    Configuration(String),

    /// Instrument or evaluation mode not supported
    UnsupportedInstrument(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::MarketDataNotFound(msg) => {
                write!(f, "Market data not found: {}", msg)
            }
            PricingError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            PricingError::UnsupportedInstrument(msg) => {
                write!(f, "Unsupported instrument: {}", msg)
            }
        }
    }
}

impl std::error::Error for PricingError {}
