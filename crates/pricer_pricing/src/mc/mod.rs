//! Monte Carlo pricing kernels.
//!
//! This module provides the simulation infrastructure for pricing contracts
//! under correlated log-normal dynamics with deterministic rates, dividend
//! yields and volatilities.
//!
//! # Architecture
//!
//! ```text
//! McPricer / LsmPricer
//! ├── McParams          (generator, scheme, variance reduction)
//! ├── SimulationSetup   (variances and drifts on the fixing grid)
//! ├── McPathGenerator   (Euler scheme, optional antithetic mirroring)
//! │   └── NormalRng     (pseudo-random or Sobol uniforms → normals)
//! └── Product           (whole-path or stepwise evaluation)
//! ```
//!
//! # Drivers
//!
//! - [`McPricer`]: forward simulation for contracts supporting whole-path
//!   evaluation (European, digital, worst-of digital, Asian basket)
//! - [`LsmPricer`]: regression Monte Carlo for early-exercise contracts
//!   supporting stepwise evaluation (Bermudan, American)
//!
//! Both accumulate one discounted value per trial into a
//! [`MeanVarCalculator`](crate::stats::MeanVarCalculator); read the estimate
//! with [`PricingResult::from_accumulator`].
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::market_data::{FlatCurve, FlatVol};
//! use pricer_models::products::{DigitalCallPut, PayoffType};
//! use pricer_pricing::mc::{ControlVarType, McParams, McPricer, PricingResult, UrngType};
//! use pricer_pricing::stats::MeanVarCalculator;
//!
//! let params = McParams::builder()
//!     .urng_type(UrngType::Sobol)
//!     .control_var_type(ControlVarType::Antithetic)
//!     .build();
//!
//! let product = DigitalCallPut::new(PayoffType::Call, 100.0, 1.0).unwrap();
//! let mut pricer = McPricer::new(
//!     product,
//!     &FlatCurve::new(0.0),
//!     0.0,
//!     &FlatVol::new(0.2),
//!     100.0,
//!     &params,
//! )
//! .unwrap();
//!
//! let mut acc = MeanVarCalculator::new(1);
//! pricer.simulate(&mut acc, 4_096).unwrap();
//! let result = PricingResult::from_accumulator(&acc, 0);
//! // N(-0.1)
//! assert!((result.mean - 0.4602).abs() < 0.01);
//! ```

mod config;
mod error;
mod lsm;
mod paths;
mod pricer;
mod result;
mod setup;

pub use config::{
    ControlVarType, McParams, McParamsBuilder, PathGenType, UrngType, KEY_CONTROLVARTYPE,
    KEY_PATHGENTYPE, KEY_SEED, KEY_URNGTYPE,
};
pub use error::{ConfigError, McError};
pub use lsm::LsmPricer;
pub use paths::{
    correlation_cholesky, AntitheticPathGenerator, EulerPathGenerator, McPathGenerator,
    PathGenerator,
};
pub use pricer::McPricer;
pub use result::PricingResult;
