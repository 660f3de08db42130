//! Error types for analytical pricing formulas.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Input validation errors of the closed-form formulas.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Negative or non-finite volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Non-positive or non-finite spot price.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Strike outside the formula's domain.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Negative or non-finite time to expiry.
    #[error("Invalid time to expiry: T = {time_to_exp}")]
    InvalidExpiry {
        /// The invalid time to expiry
        time_to_exp: f64,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AnalyticalError::InvalidSpot { spot: -1.0 }.to_string(),
            "Invalid spot price: S = -1"
        );
        assert!(AnalyticalError::InvalidExpiry { time_to_exp: -0.5 }
            .to_string()
            .contains("-0.5"));
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = AnalyticalError::InvalidStrike { strike: -5.0 }.into();
        assert!(matches!(err, PricingError::InvalidInput(msg) if msg.contains("-5")));
    }
}
