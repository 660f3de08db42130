//! Yield curve trait definition.

use crate::market_data::error::MarketDataError;
use crate::market_data::{check_maturity, to_f64};
use num_traits::Float;

/// Tenor used to approximate instantaneous quantities by a finite difference
/// when an implementation does not provide them in closed form.
const SHORT_TENOR: f64 = 1.0e-6;

/// Generic yield curve trait for discount factor and rate calculations.
///
/// All implementations are generic over `T: Float`. The pricing engine only
/// consumes the `f64` instantiation, read-only, through [`CurveEnum`].
///
/// # Contract
///
/// - `discount(t)` returns the discount factor D(t) for maturity t
/// - `fwd_discount(t1, t2)` returns D(t2) / D(t1)
/// - `spot_rate(t)` returns the continuously compounded zero rate
/// - `fwd_rate(t1, t2)` returns the continuously compounded forward rate
///
/// # Invariants
///
/// - D(0) = 1
/// - D(t) > 0 for all t >= 0
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
///
/// let df = curve.discount(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
///
/// let rate = curve.spot_rate(1.0).unwrap();
/// assert!((rate - 0.05).abs() < 1e-10);
///
/// let fwd = curve.fwd_rate(1.0, 2.0).unwrap();
/// assert!((fwd - 0.05).abs() < 1e-10);
/// ```
///
/// [`CurveEnum`]: super::CurveEnum
pub trait YieldCurve<T: Float> {
    /// Return the discount factor for maturity `t`.
    ///
    /// # Returns
    ///
    /// * `Ok(D(t))` - Discount factor at time t
    /// * `Err(MarketDataError::InvalidMaturity)` - If t < 0
    fn discount(&self, t: T) -> Result<T, MarketDataError>;

    /// Return the forward discount factor D(t2) / D(t1).
    ///
    /// # Returns
    ///
    /// * `Err(MarketDataError::InvalidMaturity)` - If either time is negative or t2 < t1
    fn fwd_discount(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t2 < t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: to_f64(t2 - t1),
            });
        }
        Ok(self.discount(t2)? / self.discount(t1)?)
    }

    /// Return the continuously compounded zero rate for maturity `t`.
    ///
    /// ```text
    /// r(t) = -ln(D(t)) / t
    /// ```
    ///
    /// At `t = 0` the limit, i.e. the instantaneous short rate, is returned.
    fn spot_rate(&self, t: T) -> Result<T, MarketDataError> {
        check_maturity(t)?;
        if t == T::zero() {
            return self.fwd_rate(T::zero(), T::zero());
        }
        Ok(-self.discount(t)?.ln() / t)
    }

    /// Return the continuously compounded forward rate between t1 and t2.
    ///
    /// ```text
    /// f(t1, t2) = -ln(D(t2) / D(t1)) / (t2 - t1)
    /// ```
    ///
    /// For `t1 == t2` the instantaneous forward rate at t1 is returned.
    fn fwd_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        check_maturity(t1)?;
        if t2 < t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: to_f64(t2 - t1),
            });
        }
        let t2 = if t2 == t1 {
            t1 + T::from(SHORT_TENOR).unwrap_or_else(T::epsilon)
        } else {
            t2
        };
        Ok(-self.fwd_discount(t1, t2)?.ln() / (t2 - t1))
    }
}
