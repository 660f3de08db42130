//! Volatility term structure abstractions.
//!
//! This module provides:
//! - [`VolatilityTermStructure`]: Generic trait for spot and forward volatility lookup
//! - [`FlatVol`]: Constant volatility implementation
//! - [`VolTermStructure`]: Piecewise-flat forward volatility built from pillar quotes
//! - [`VolInputType`]: How pillar quotes are interpreted
//! - [`VolEnum`]: Static dispatch enum wrapping concrete implementations

mod flat;
mod term_structure;
mod traits;
mod vol_enum;

pub use flat::FlatVol;
pub use term_structure::{VolInputType, VolTermStructure};
pub use traits::VolatilityTermStructure;
pub use vol_enum::VolEnum;
