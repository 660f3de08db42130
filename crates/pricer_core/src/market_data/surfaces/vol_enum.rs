//! Static dispatch enum wrapping FlatVol and VolTermStructure.

use super::{FlatVol, VolTermStructure, VolatilityTermStructure};
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Static dispatch enum wrapping concrete volatility implementations.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{VolEnum, VolatilityTermStructure};
///
/// let vol = VolEnum::flat(0.3_f64);
/// assert_eq!(vol.spot_vol(2.0).unwrap(), 0.3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum VolEnum<T: Float> {
    /// Constant volatility
    Flat(FlatVol<T>),
    /// Piecewise-flat forward volatility term structure
    TermStructure(VolTermStructure<T>),
}

impl<T: Float> VolEnum<T> {
    /// Construct a flat volatility variant.
    #[inline]
    pub fn flat(sigma: T) -> Self {
        VolEnum::Flat(FlatVol::new(sigma))
    }
}

impl<T: Float> From<FlatVol<T>> for VolEnum<T> {
    fn from(vol: FlatVol<T>) -> Self {
        VolEnum::Flat(vol)
    }
}

impl<T: Float> From<VolTermStructure<T>> for VolEnum<T> {
    fn from(vol: VolTermStructure<T>) -> Self {
        VolEnum::TermStructure(vol)
    }
}

impl<T: Float> VolatilityTermStructure<T> for VolEnum<T> {
    #[inline]
    fn spot_vol(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            VolEnum::Flat(v) => v.spot_vol(t),
            VolEnum::TermStructure(v) => v.spot_vol(t),
        }
    }

    #[inline]
    fn total_variance(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            VolEnum::Flat(v) => v.total_variance(t),
            VolEnum::TermStructure(v) => v.total_variance(t),
        }
    }

    #[inline]
    fn fwd_vol(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        match self {
            VolEnum::Flat(v) => v.fwd_vol(t1, t2),
            VolEnum::TermStructure(v) => v.fwd_vol(t1, t2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::surfaces::VolInputType;

    #[test]
    fn test_dispatch_matches_inner() {
        let inner = VolTermStructure::new(&[1.0, 2.0], &[0.2, 0.3], VolInputType::SpotVol).unwrap();
        let vol: VolEnum<f64> = inner.clone().into();
        for t in [0.0, 0.5, 1.5, 3.0] {
            assert_eq!(vol.spot_vol(t).unwrap(), inner.spot_vol(t).unwrap());
            assert_eq!(vol.total_variance(t).unwrap(), inner.total_variance(t).unwrap());
        }
        assert_eq!(vol.fwd_vol(0.5, 1.5).unwrap(), inner.fwd_vol(0.5, 1.5).unwrap());
    }
}
