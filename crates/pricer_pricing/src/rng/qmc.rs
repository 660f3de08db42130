//! Quasi-Monte Carlo low-discrepancy sequences.
//!
//! [`SobolSequence`] wraps the `sobol` crate's Gray-code (Antonov-Saleev)
//! generator with the Joe-Kuo D6 direction numbers, which cover
//! [`SOBOL_MAX_DIMENSIONS`] dimensions. The zero point that starts every
//! Sobol sequence is skipped, so all coordinates lie in (0, 1) and the
//! first point is 0.5 in every dimension.

use sobol::params::JoeKuoD6;
use sobol::Sobol;
use std::fmt;
use std::sync::OnceLock;
use tracing::warn;

/// Maximum number of Sobol dimensions supported (Joe-Kuo D6 extended set).
pub const SOBOL_MAX_DIMENSIONS: usize = 21_201;

/// Direction numbers, parsed once per process.
fn joe_kuo() -> &'static JoeKuoD6 {
    static PARAMS: OnceLock<JoeKuoD6> = OnceLock::new();
    PARAMS.get_or_init(JoeKuoD6::extended)
}

/// Trait for low-discrepancy sequences used in quasi-Monte Carlo methods.
///
/// The dimensionality is fixed at construction.
pub trait LowDiscrepancySequence {
    /// Number of coordinates in each point.
    fn dimension(&self) -> usize;

    /// Advance the sequence and return the next point, each coordinate in (0, 1).
    fn next_point(&mut self) -> &[f64];

    /// Reset to the first point.
    fn reset(&mut self);

    /// Skip `n` points.
    ///
    /// Disjoint blocks of one sequence can be handed to separate workers by
    /// skipping each worker to the start of its block.
    fn skip(&mut self, n: usize);
}

/// Sobol sequence generator.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::{LowDiscrepancySequence, SobolSequence};
///
/// let mut sobol = SobolSequence::new(2).unwrap();
/// assert_eq!(sobol.next_point(), &[0.5, 0.5]);
/// assert_eq!(sobol.next_point(), &[0.75, 0.25]);
/// assert_eq!(sobol.next_point(), &[0.25, 0.75]);
/// ```
pub struct SobolSequence {
    inner: Sobol<f64>,
    /// Current point.
    point: Vec<f64>,
    /// Points returned since the skipped zero point.
    index: u64,
}

impl SobolSequence {
    /// Sobol sequence of `dimension` coordinates.
    ///
    /// Returns `None` if `dimension` is zero or exceeds
    /// [`SOBOL_MAX_DIMENSIONS`].
    pub fn new(dimension: usize) -> Option<Self> {
        if dimension == 0 || dimension > SOBOL_MAX_DIMENSIONS {
            return None;
        }
        Some(Self {
            inner: Self::origin(dimension),
            point: vec![0.0; dimension],
            index: 0,
        })
    }

    /// Fresh generator positioned after the zero point.
    fn origin(dimension: usize) -> Sobol<f64> {
        let mut inner = Sobol::<f64>::new(dimension, joe_kuo());
        inner.next();
        inner
    }

    /// Advance the underlying generator by one point, restarting when the
    /// sequence is exhausted.
    fn advance(&mut self) {
        match self.inner.next() {
            Some(p) => {
                self.point.copy_from_slice(&p);
                self.index += 1;
            }
            None => {
                warn!("Sobol sequence exhausted, restarting");
                self.reset();
                self.advance();
            }
        }
    }
}

impl LowDiscrepancySequence for SobolSequence {
    fn dimension(&self) -> usize {
        self.point.len()
    }

    fn next_point(&mut self) -> &[f64] {
        self.advance();
        &self.point
    }

    fn reset(&mut self) {
        self.inner = Self::origin(self.point.len());
        self.point.fill(0.0);
        self.index = 0;
    }

    fn skip(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }
}

impl Clone for SobolSequence {
    fn clone(&self) -> Self {
        let mut copy = Self {
            inner: Self::origin(self.point.len()),
            point: vec![0.0; self.point.len()],
            index: 0,
        };
        copy.skip(self.index as usize);
        copy
    }
}

impl fmt::Debug for SobolSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SobolSequence")
            .field("dimension", &self.point.len())
            .field("index", &self.index)
            .finish()
    }
}
