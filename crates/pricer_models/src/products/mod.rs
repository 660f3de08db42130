//! Contract definitions and the shared evaluation protocol.
//!
//! This module provides:
//! - [`Product`]: Capability shared by all contracts (schedules, payment
//!   amounts, whole-path and stepwise evaluation)
//! - [`Schedule`]: Validated fixing and payment times
//! - [`PayoffType`]: Call/put direction
//! - Contract variants: [`EuropeanCallPut`], [`DigitalCallPut`],
//!   [`WorstOfDigitalCallPut`], [`AsianBasketCallPut`], [`BermudanCallPut`]
//! - [`ProductEnum`]: Static dispatch over the variants
//! - [`ContractSpec`]: Serialisable contract description
//! - [`ProductError`]: Construction and evaluation errors

mod asian_basket;
mod bermudan;
mod digital;
mod error;
mod european;
mod payoff;
mod product_enum;
mod schedule;
mod spec;
mod traits;
mod worst_of_digital;

pub use asian_basket::AsianBasketCallPut;
pub use bermudan::BermudanCallPut;
pub use digital::DigitalCallPut;
pub use error::ProductError;
pub use european::EuropeanCallPut;
pub use payoff::PayoffType;
pub use product_enum::ProductEnum;
pub use schedule::Schedule;
pub use spec::ContractSpec;
pub use traits::Product;
pub use worst_of_digital::WorstOfDigitalCallPut;
