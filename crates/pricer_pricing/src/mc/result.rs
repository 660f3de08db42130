//! Price estimate read out of an accumulator.

use crate::stats::MeanVarCalculator;

/// Monte Carlo price estimate.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PricingResult;
///
/// let result = PricingResult { mean: 10.5, std_err: 0.05 };
/// assert!((result.confidence_95() - 0.098).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Mean of the discounted trial values.
    pub mean: f64,
    /// Standard error of the mean.
    pub std_err: f64,
}

impl PricingResult {
    /// Estimate for variable `var` of an accumulator.
    ///
    /// # Panics
    ///
    /// Panics if `var` is out of range.
    pub fn from_accumulator(acc: &MeanVarCalculator, var: usize) -> Self {
        Self {
            mean: acc.mean()[var],
            std_err: acc.std_err()[var],
        }
    }

    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_err
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_err
    }
}
