//! # pricer_core: Foundation Layer for the Monte Carlo Pricing Library
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace and provides:
//! - Read-only market-data capabilities: yield curves (`market_data::curves`)
//!   and volatility term structures (`market_data::surfaces`)
//! - An explicitly passed market-data registry (`market_data::MarketStore`)
//! - Normal distribution functions (`math::distributions`)
//! - A dense row-major matrix used for simulated paths and statistics (`math::matrix`)
//! - Error types: `PricingError` (`types::error`), `MarketDataError` (`market_data::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - tracing: Diagnostics for registry updates
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
//! use pricer_core::math::distributions::{inverse_norm_cdf, norm_cdf};
//!
//! let curve = FlatCurve::new(0.05_f64);
//! let df = curve.discount(1.0).unwrap();
//! assert!((df - (-0.05_f64).exp()).abs() < 1e-12);
//!
//! let x = inverse_norm_cdf(0.975);
//! assert!((norm_cdf(x) - 0.975).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for market-data input types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
