//! Static dispatch enum wrapping FlatCurve and InterpolatedCurve.

use super::{FlatCurve, InterpolatedCurve, YieldCurve};
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Static dispatch enum wrapping concrete yield curve implementations.
///
/// This is the type held by the market store and consumed by the pricer,
/// avoiding trait objects while keeping the generic `T: Float` parameter.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CurveEnum, FlatCurve, YieldCurve};
///
/// let curve = CurveEnum::Flat(FlatCurve::new(0.05_f64));
/// let df = curve.discount(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CurveEnum<T: Float> {
    /// Flat (constant rate) yield curve
    Flat(FlatCurve<T>),
    /// Piecewise-flat forward curve with pillar points
    Interpolated(InterpolatedCurve<T>),
}

impl<T: Float> CurveEnum<T> {
    /// Construct a flat curve variant.
    #[inline]
    pub fn flat(rate: T) -> Self {
        CurveEnum::Flat(FlatCurve::new(rate))
    }
}

impl<T: Float> From<FlatCurve<T>> for CurveEnum<T> {
    fn from(curve: FlatCurve<T>) -> Self {
        CurveEnum::Flat(curve)
    }
}

impl<T: Float> From<InterpolatedCurve<T>> for CurveEnum<T> {
    fn from(curve: InterpolatedCurve<T>) -> Self {
        CurveEnum::Interpolated(curve)
    }
}

impl<T: Float> YieldCurve<T> for CurveEnum<T> {
    #[inline]
    fn discount(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(c) => c.discount(t),
            CurveEnum::Interpolated(c) => c.discount(t),
        }
    }

    #[inline]
    fn fwd_discount(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(c) => c.fwd_discount(t1, t2),
            CurveEnum::Interpolated(c) => c.fwd_discount(t1, t2),
        }
    }

    #[inline]
    fn spot_rate(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(c) => c.spot_rate(t),
            CurveEnum::Interpolated(c) => c.spot_rate(t),
        }
    }

    #[inline]
    fn fwd_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(c) => c.fwd_rate(t1, t2),
            CurveEnum::Interpolated(c) => c.fwd_rate(t1, t2),
        }
    }
}
