//! Closed-form Black-Scholes reference formulas.
//!
//! These prices and Greeks are benchmarks for the Monte Carlo engine:
//! - [`fwd_price`]: Forward price of a dividend-paying asset
//! - [`european_option_bs`]: European call/put
//! - [`digital_option_bs`]: Cash-or-nothing digital call/put
//!
//! Zero volatility or zero time to expiry return the limiting values
//! (discounted deterministic payoff) rather than NaN.

pub mod black_scholes;
pub mod error;

pub use black_scholes::{digital_option_bs, european_option_bs, fwd_price, Greeks};
pub use error::AnalyticalError;
