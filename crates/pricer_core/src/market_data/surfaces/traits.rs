//! Volatility term structure trait definition.

use crate::market_data::error::MarketDataError;
use crate::market_data::{check_maturity, to_f64};
use num_traits::Float;

/// Generic volatility term structure for a single underlying.
///
/// # Contract
///
/// - `spot_vol(t)` returns the volatility σ(t) such that σ(t)² t is the total
///   variance accumulated from 0 to t
/// - `fwd_vol(t1, t2)` returns the volatility over the interval, with
///   ```text
///   fwd_vol(t1, t2)² (t2 - t1) = spot_vol(t2)² t2 - spot_vol(t1)² t1
///   ```
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{VolatilityTermStructure, FlatVol};
///
/// let vol = FlatVol::new(0.20_f64);
/// assert_eq!(vol.spot_vol(1.0).unwrap(), 0.20);
/// assert_eq!(vol.fwd_vol(1.0, 2.0).unwrap(), 0.20);
/// ```
pub trait VolatilityTermStructure<T: Float> {
    /// Return the spot volatility for maturity `t`.
    ///
    /// # Returns
    ///
    /// * `Err(MarketDataError::InvalidMaturity)` - If t < 0
    fn spot_vol(&self, t: T) -> Result<T, MarketDataError>;

    /// Return the total variance σ(t)² t accumulated up to `t`.
    fn total_variance(&self, t: T) -> Result<T, MarketDataError> {
        let v = self.spot_vol(t)?;
        Ok(v * v * t)
    }

    /// Return the forward volatility between t1 and t2.
    ///
    /// For `t1 == t2` the spot volatility at t1 is returned, which is exact
    /// for flat structures.
    fn fwd_vol(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        check_maturity(t1)?;
        if t2 < t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: to_f64(t2 - t1),
            });
        }
        if t2 == t1 {
            return self.spot_vol(t1);
        }
        let var = self.fwd_variance(t1, t2)?;
        Ok((var / (t2 - t1)).sqrt())
    }

    /// Return the variance accumulated between t1 and t2, floored at zero.
    fn fwd_variance(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t2 < t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: to_f64(t2 - t1),
            });
        }
        let var = self.total_variance(t2)? - self.total_variance(t1)?;
        Ok(var.max(T::zero()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Spot vol rising linearly with maturity
    struct MockVol;

    impl VolatilityTermStructure<f64> for MockVol {
        fn spot_vol(&self, t: f64) -> Result<f64, MarketDataError> {
            check_maturity(t)?;
            Ok(0.1 + 0.1 * t)
        }
    }

    #[test]
    fn test_default_fwd_vol() {
        let vol = MockVol;
        let expected = ((0.3_f64.powi(2) * 2.0 - 0.2_f64.powi(2)) / 1.0).sqrt();
        assert_relative_eq!(vol.fwd_vol(1.0, 2.0).unwrap(), expected, epsilon = 1e-14);
    }

    #[test]
    fn test_default_fwd_variance_additive() {
        let vol = MockVol;
        let a = vol.fwd_variance(0.0, 1.0).unwrap();
        let b = vol.fwd_variance(1.0, 3.0).unwrap();
        assert_relative_eq!(a + b, vol.total_variance(3.0).unwrap(), epsilon = 1e-14);
    }

    #[test]
    fn test_reversed_interval_rejected() {
        let vol = MockVol;
        assert!(vol.fwd_vol(2.0, 1.0).is_err());
        assert!(vol.fwd_variance(2.0, 1.0).is_err());
    }
}
