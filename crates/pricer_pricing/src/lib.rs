//! # Pricer Pricing (Layer 3: Monte Carlo Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing is the simulation engine of the 4-layer architecture:
//! - Uniform generators reproducing the C++ standard-library reference
//!   sequences, plus Sobol low-discrepancy points
//! - Normal variates by inverse CDF and Euler path generation for correlated
//!   log-normal assets, with optional antithetic mirroring
//! - Forward Monte Carlo ([`mc::McPricer`]) and regression Monte Carlo
//!   ([`mc::LsmPricer`]) drivers over the contract protocol of
//!   `pricer_models`
//! - Online mean/variance accumulation
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): yield curves, volatility term structures, the
//!   named market store, normal distribution maths, `Matrix`
//! - Layer 2 (pricer_models): `Product` protocol, contract variants,
//!   `ContractSpec`
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::{CurveEnum, MarketStore, VolEnum};
//! use pricer_models::products::{ContractSpec, PayoffType};
//! use pricer_pricing::api::price;
//! use pricer_pricing::mc::{McParams, UrngType};
//!
//! let mut market = MarketStore::new();
//! let curve = market.yield_curves.set("EUR.ESTR", CurveEnum::flat(0.03)).unwrap();
//! let vol = market.volatilities.set("SX5E", VolEnum::flat(0.25)).unwrap();
//!
//! let contract = ContractSpec::Digital {
//!     payoff: PayoffType::Call,
//!     strike: 4000.0,
//!     time_to_exp: 0.5,
//! };
//! let params = McParams::builder().urng_type(UrngType::Ranlux3).seed(7).build();
//!
//! let result = price(&market, &contract, &curve, 0.02, &vol, 4100.0, &params, 5_000).unwrap();
//! assert!(result.mean > 0.0 && result.mean < 1.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
// Allow unknown lints for clippy compatibility across versions
#![allow(unknown_lints)]

pub mod api;
pub mod mc;
pub mod rng;
pub mod stats;

// Re-export commonly used items for convenience
pub use api::{price, price_basket, sobol_sequence};
pub use mc::{ConfigError, LsmPricer, McError, McParams, McPricer, PricingResult};
pub use stats::MeanVarCalculator;
