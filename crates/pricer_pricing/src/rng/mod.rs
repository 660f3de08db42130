//! # Random Number Generation Infrastructure
//!
//! This module provides the uniform and normal variate sources consumed by
//! the path generators.
//!
//! ## Module Structure
//!
//! - [`prng`]: Pseudo-random engines reproducing the C++ standard-library
//!   reference sequences (MINSTD, MT19937, RANLUX3, RANLUX4)
//! - [`qmc`]: Low-discrepancy sequences (Sobol)
//! - [`normal`]: Uniform source selection and the inverse-CDF normal transform
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::mc::UrngType;
//! use pricer_pricing::rng::NormalRng;
//!
//! let mut rng = NormalRng::new(UrngType::Mt19937, 4, Some(12345)).unwrap();
//! let mut z = vec![0.0; 4];
//! rng.next(&mut z).unwrap();
//! assert!(z.iter().all(|x| x.is_finite()));
//! ```

pub mod normal;
pub mod prng;
pub mod qmc;

pub use normal::{NormalRng, UniformSource};
pub use prng::{
    MinStdRand, Mt19937, Ranlux, Ranlux24, Ranlux24Base, Ranlux48, Ranlux48Base,
    SubtractWithCarry, UniformRng, RANLUX_DEFAULT_SEED,
};
pub use qmc::{LowDiscrepancySequence, SobolSequence, SOBOL_MAX_DIMENSIONS};
