//! Running mean and variance with an exact pairwise merge.
//!
//! Updates use Welford's recurrence, so the variance never suffers the
//! cancellation of a naive sum-of-squares. Two accumulators built from
//! disjoint sample sets can be combined with [`MeanVarCalculator::merge`]
//! (Chan, Golub and LeVeque), which gives the statistics of the union; this
//! is how per-worker results are reduced.

use pricer_core::math::Matrix;

/// Online mean/variance accumulator over a fixed number of variables.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::stats::MeanVarCalculator;
///
/// let mut acc = MeanVarCalculator::new(1);
/// for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.add(&[x]);
/// }
/// let res = acc.results();
/// assert_eq!(res[(0, 0)], 5.0);
/// assert!((res[(1, 0)] - 32.0 / 7.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MeanVarCalculator {
    n: u64,
    mean: Vec<f64>,
    /// Sum of squared deviations from the running mean.
    m2: Vec<f64>,
}

impl MeanVarCalculator {
    /// Accumulator for `n_variables` outputs per sample.
    pub fn new(n_variables: usize) -> Self {
        Self {
            n: 0,
            mean: vec![0.0; n_variables],
            m2: vec![0.0; n_variables],
        }
    }

    /// Number of tracked variables.
    #[inline]
    pub fn n_variables(&self) -> usize {
        self.mean.len()
    }

    /// Number of samples added.
    #[inline]
    pub fn n_samples(&self) -> u64 {
        self.n
    }

    /// Add one sample.
    ///
    /// # Panics
    ///
    /// Panics if `sample.len()` differs from the number of variables.
    pub fn add(&mut self, sample: &[f64]) {
        assert_eq!(
            sample.len(),
            self.mean.len(),
            "sample length must equal the number of variables"
        );
        self.n += 1;
        let n = self.n as f64;
        for ((mean, m2), &x) in self.mean.iter_mut().zip(&mut self.m2).zip(sample) {
            let delta = x - *mean;
            *mean += delta / n;
            *m2 += delta * (x - *mean);
        }
    }

    /// Fold `other` into `self`.
    ///
    /// # Panics
    ///
    /// Panics if the accumulators track different numbers of variables.
    pub fn merge(&mut self, other: &MeanVarCalculator) {
        assert_eq!(
            self.mean.len(),
            other.mean.len(),
            "accumulators must track the same number of variables"
        );
        if other.n == 0 {
            return;
        }
        if self.n == 0 {
            self.clone_from(other);
            return;
        }
        let na = self.n as f64;
        let nb = other.n as f64;
        let n = na + nb;
        for i in 0..self.mean.len() {
            let delta = other.mean[i] - self.mean[i];
            self.mean[i] += delta * nb / n;
            self.m2[i] += other.m2[i] + delta * delta * na * nb / n;
        }
        self.n += other.n;
    }

    /// Sample means; NaN before the first sample.
    pub fn mean(&self) -> Vec<f64> {
        if self.n == 0 {
            return vec![f64::NAN; self.mean.len()];
        }
        self.mean.clone()
    }

    /// Unbiased sample variances; NaN before the first sample, 0 after one.
    pub fn variance(&self) -> Vec<f64> {
        match self.n {
            0 => vec![f64::NAN; self.m2.len()],
            1 => vec![0.0; self.m2.len()],
            n => self.m2.iter().map(|m2| m2 / (n - 1) as f64).collect(),
        }
    }

    /// Standard errors of the means, `sqrt(variance / n)`.
    pub fn std_err(&self) -> Vec<f64> {
        let n = self.n as f64;
        self.variance().into_iter().map(|v| (v / n).sqrt()).collect()
    }

    /// 2 x n grid: row 0 holds the means, row 1 the sample variances.
    pub fn results(&self) -> Matrix {
        let mut res = Matrix::new(2, self.mean.len());
        res.row_mut(0).copy_from_slice(&self.mean());
        res.row_mut(1).copy_from_slice(&self.variance());
        res
    }

    /// Discard all samples.
    pub fn reset(&mut self) {
        self.n = 0;
        self.mean.fill(0.0);
        self.m2.fill(0.0);
    }
}
