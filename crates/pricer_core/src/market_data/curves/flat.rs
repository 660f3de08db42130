//! Flat yield curve implementation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::market_data::{check_maturity, to_f64};
use num_traits::Float;

/// Flat yield curve with constant continuously compounded rate.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
///
/// // Discount factor at t=1: exp(-0.05 * 1)
/// let df = curve.discount(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
///
/// // Zero rate is constant
/// assert_eq!(curve.spot_rate(1.0).unwrap(), 0.05);
/// assert_eq!(curve.spot_rate(5.0).unwrap(), 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Construct a flat curve with the given constant rate.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// Return the constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn discount(&self, t: T) -> Result<T, MarketDataError> {
        check_maturity(t)?;
        Ok((-self.rate * t).exp())
    }

    fn spot_rate(&self, t: T) -> Result<T, MarketDataError> {
        check_maturity(t)?;
        Ok(self.rate)
    }

    fn fwd_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        check_maturity(t1)?;
        if t2 < t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: to_f64(t2 - t1),
            });
        }
        Ok(self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ========================================
    // Discount Factor Tests
    // ========================================

    #[test]
    fn test_discount_at_zero() {
        let curve = FlatCurve::new(0.05_f64);
        assert_eq!(curve.discount(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_discount_at_multiple_years() {
        let curve = FlatCurve::new(0.05_f64);
        for t in [0.5, 1.0, 2.0, 5.0, 10.0] {
            assert_relative_eq!(curve.discount(t).unwrap(), (-0.05 * t).exp(), epsilon = 1e-14);
        }
    }

    #[test]
    fn test_discount_negative_maturity() {
        let curve = FlatCurve::new(0.05_f64);
        match curve.discount(-1.0).unwrap_err() {
            MarketDataError::InvalidMaturity { t } => assert_eq!(t, -1.0),
            _ => panic!("Expected InvalidMaturity error"),
        }
    }

    #[test]
    fn test_negative_rate_allowed() {
        let curve = FlatCurve::new(-0.01_f64);
        assert_relative_eq!(curve.discount(1.0).unwrap(), 0.01_f64.exp(), epsilon = 1e-14);
    }

    // ========================================
    // Rate Tests
    // ========================================

    #[test]
    fn test_spot_rate_constant_including_zero() {
        let curve = FlatCurve::new(0.03_f64);
        for t in [0.0, 0.25, 1.0, 10.0] {
            assert_eq!(curve.spot_rate(t).unwrap(), 0.03);
        }
    }

    #[test]
    fn test_fwd_rate_and_discount() {
        let curve = FlatCurve::new(0.04_f64);
        assert_eq!(curve.fwd_rate(1.0, 2.0).unwrap(), 0.04);
        assert_eq!(curve.fwd_rate(1.0, 1.0).unwrap(), 0.04);
        assert_relative_eq!(
            curve.fwd_discount(1.0, 2.0).unwrap(),
            (-0.04_f64).exp(),
            epsilon = 1e-14
        );
        assert!(curve.fwd_rate(2.0, 1.0).is_err());
    }

    #[test]
    fn test_with_f32() {
        let curve = FlatCurve::new(0.05_f32);
        let df = curve.discount(1.0_f32).unwrap();
        assert!((df - (-0.05_f32).exp()).abs() < 1e-6);
    }
}
