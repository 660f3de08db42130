//! Flat volatility implementation.

use super::VolatilityTermStructure;
use crate::market_data::check_maturity;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Constant volatility for all maturities.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{VolatilityTermStructure, FlatVol};
///
/// let vol = FlatVol::new(0.20_f64);
/// assert_eq!(vol.spot_vol(0.5).unwrap(), 0.20);
/// assert_eq!(vol.fwd_vol(1.0, 3.0).unwrap(), 0.20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatVol<T: Float> {
    sigma: T,
}

impl<T: Float> FlatVol<T> {
    /// Construct a flat volatility.
    #[inline]
    pub fn new(sigma: T) -> Self {
        Self { sigma }
    }

    /// Return the constant volatility.
    #[inline]
    pub fn sigma(&self) -> T {
        self.sigma
    }
}

impl<T: Float> VolatilityTermStructure<T> for FlatVol<T> {
    fn spot_vol(&self, t: T) -> Result<T, MarketDataError> {
        check_maturity(t)?;
        Ok(self.sigma)
    }

    fn fwd_vol(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        check_maturity(t1)?;
        if t2 < t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: (t2 - t1).to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.sigma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_everywhere() {
        let vol = FlatVol::new(0.25_f64);
        assert_eq!(vol.sigma(), 0.25);
        for t in [0.0, 0.1, 1.0, 30.0] {
            assert_eq!(vol.spot_vol(t).unwrap(), 0.25);
        }
        assert_eq!(vol.fwd_vol(2.0, 2.0).unwrap(), 0.25);
    }

    #[test]
    fn test_total_and_forward_variance() {
        let vol = FlatVol::new(0.2_f64);
        assert_relative_eq!(vol.total_variance(2.0).unwrap(), 0.08, epsilon = 1e-15);
        assert_relative_eq!(vol.fwd_variance(1.0, 1.5).unwrap(), 0.02, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_vol_is_valid() {
        let vol = FlatVol::new(0.0_f64);
        assert_eq!(vol.fwd_variance(0.0, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_time_rejected() {
        let vol = FlatVol::new(0.2_f64);
        assert!(vol.spot_vol(-1.0).is_err());
        assert!(vol.fwd_vol(1.0, 0.5).is_err());
    }
}
