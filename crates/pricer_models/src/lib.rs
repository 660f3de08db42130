//! # Pricer Models (L2: Business Logic)
//!
//! Contract definitions and analytic reference formulas.
//!
//! This crate provides:
//! - The contract evaluation protocol ([`products::Product`]) shared by the
//!   forward Monte Carlo driver and backward-induction drivers
//! - Contract variants: European, digital, worst-of digital, Asian basket,
//!   Bermudan and American call/put
//! - Black-Scholes closed-form prices and Greeks used as benchmarks
//!
//! ## Design Principles
//!
//! - **Enum-based contracts** ([`products::ProductEnum`]) for static dispatch
//! - **Validated construction**: schedules and parameters are checked once,
//!   contracts are immutable apart from their payment-amount output slot
//! - **Serialisable specs** ([`products::ContractSpec`]) describe contracts at
//!   the service boundary

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod products;
