//! Market data structures consumed by the pricing engine.
//!
//! This module provides yield curve and volatility term structure
//! abstractions, plus the named registry through which pricing calls
//! resolve them.
//!
//! # Architecture
//!
//! Curves and vol structures are generic over `T: Float`; the registry
//! stores the `f64` instantiations behind `Arc` so they can be read-shared
//! across concurrent pricing runs.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait and implementations (FlatCurve, InterpolatedCurve)
//! - [`surfaces`]: Volatility term structure trait and implementations (FlatVol, VolTermStructure)
//! - [`store`]: Named registry (MarketStore)
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
//! use pricer_core::market_data::surfaces::{VolatilityTermStructure, FlatVol};
//!
//! let curve = FlatCurve::new(0.05_f64);
//! let df = curve.discount(1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//!
//! let vol = FlatVol::new(0.20_f64);
//! assert_eq!(vol.spot_vol(1.0).unwrap(), 0.20);
//! ```

pub mod curves;
pub mod error;
pub mod store;
pub mod surfaces;

#[inline]
pub(crate) fn to_f64<T: num_traits::Float>(t: T) -> f64 {
    t.to_f64().unwrap_or(f64::NAN)
}

/// Reject negative or NaN times.
#[inline]
pub(crate) fn check_maturity<T: num_traits::Float>(t: T) -> Result<(), MarketDataError> {
    if t < T::zero() || t.is_nan() {
        return Err(MarketDataError::InvalidMaturity { t: to_f64(t) });
    }
    Ok(())
}

pub use curves::{CurveEnum, CurveInputType, FlatCurve, InterpolatedCurve, YieldCurve};
pub use error::MarketDataError;
pub use store::MarketStore;
pub use surfaces::{FlatVol, VolEnum, VolInputType, VolTermStructure, VolatilityTermStructure};
