//! Yield curve abstractions for discounting.
//!
//! This module provides:
//! - [`YieldCurve`]: Generic trait for discount factor and rate calculations
//! - [`FlatCurve`]: Constant rate yield curve implementation
//! - [`InterpolatedCurve`]: Piecewise-flat forward curve built from pillar quotes
//! - [`CurveInputType`]: How pillar quotes are interpreted
//! - [`CurveEnum`]: Static dispatch enum wrapping concrete curve implementations

mod curve_enum;
mod flat;
mod interpolated;
mod traits;

pub use curve_enum::CurveEnum;
pub use flat::FlatCurve;
pub use interpolated::{CurveInputType, InterpolatedCurve};
pub use traits::YieldCurve;
