//! Path generation for Monte Carlo simulation.
//!
//! Path generators fill a [`PathMatrix`] (rows = fixing times, columns =
//! factors) with one simulated trial of the zero-mean diffusion part of the
//! log-prices:
//!
//! ```text
//! X_i = X_{i-1} + D_i · L · Z_i,    D_i = diag(sqrt(w_i - w_{i-1}))
//! ```
//!
//! where `w_i` is each factor's total variance to the i-th fixing time,
//! `L` the Cholesky factor of the factor correlation matrix and `Z_i`
//! independent standard normals. The pricer maps `X` to price levels with
//! `S_i = F_i · exp(-w_i / 2 + X_i)`.
//!
//! Because `X` is additive and sign-symmetric, [`AntitheticPathGenerator`]
//! can produce the mirror trial by negating it. Negating price levels would
//! not be a valid antithetic path.

use super::error::ConfigError;
use crate::rng::NormalRng;
use nalgebra::DMatrix;
use pricer_core::math::{Matrix, PathMatrix};

/// Tolerance for correlation matrix symmetry and unit diagonal checks.
const CORRELATION_TOLERANCE: f64 = 1e-12;

/// Generator of simulated trials.
pub trait PathGenerator {
    /// Number of fixing times (path rows).
    fn n_times(&self) -> usize;

    /// Number of factors (path columns).
    fn n_factors(&self) -> usize;

    /// Fill `path` with the next trial, resizing it as needed.
    fn next(&mut self, path: &mut PathMatrix) -> Result<(), ConfigError>;
}

/// Euler scheme for correlated log-normal factors on a fixing grid.
///
/// The scheme is exact for log-normal dynamics with deterministic
/// volatility, since the log-price increments are Gaussian.
///
/// # Examples
///
/// ```rust
/// use pricer_core::math::Matrix;
/// use pricer_pricing::mc::{EulerPathGenerator, PathGenerator, UrngType};
/// use pricer_pricing::rng::NormalRng;
///
/// // One factor, fixings with total variance 0.04 and 0.08
/// let variances = Matrix::from_rows(&[vec![0.04], vec![0.08]]);
/// let rng = NormalRng::new(UrngType::Mt19937, 2, None).unwrap();
/// let mut gen = EulerPathGenerator::new(rng, &variances, None).unwrap();
///
/// let mut path = Matrix::default();
/// gen.next(&mut path).unwrap();
/// assert_eq!((path.n_rows(), path.n_cols()), (2, 1));
/// ```
#[derive(Debug, Clone)]
pub struct EulerPathGenerator {
    rng: NormalRng,
    /// sqrt(w_i - w_{i-1}) per fixing and factor.
    std_devs: Matrix,
    /// Lower Cholesky factor; `None` for independent factors.
    chol: Option<Matrix>,
    normals: Vec<f64>,
    correlated: Vec<f64>,
}

impl EulerPathGenerator {
    /// Generator over `rng`.
    ///
    /// # Arguments
    ///
    /// * `rng` - Normal source; must supply `n_times * n_factors` deviates per call
    /// * `variances` - Total variance to each fixing (rows) for each factor (columns)
    /// * `chol` - Lower Cholesky factor of the factor correlation matrix
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the variances are negative, not finite or
    /// decreasing along a column, or if `chol` is not `n_factors` square.
    pub fn new(
        rng: NormalRng,
        variances: &Matrix,
        chol: Option<Matrix>,
    ) -> Result<Self, ConfigError> {
        let n_times = variances.n_rows();
        let n_factors = variances.n_cols();
        if n_times == 0 || n_factors == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "variances",
                value: "need at least one fixing and one factor".to_string(),
            });
        }
        if let Some(l) = &chol {
            if l.n_rows() != n_factors || l.n_cols() != n_factors {
                return Err(ConfigError::InvalidParameter {
                    name: "correlation",
                    value: format!(
                        "Cholesky factor is {}x{}, expected {}x{}",
                        l.n_rows(),
                        l.n_cols(),
                        n_factors,
                        n_factors
                    ),
                });
            }
        }

        let mut std_devs = Matrix::new(n_times, n_factors);
        for f in 0..n_factors {
            let mut prev = 0.0;
            for i in 0..n_times {
                let w = variances[(i, f)];
                if !w.is_finite() || w < prev {
                    return Err(ConfigError::InvalidParameter {
                        name: "variances",
                        value: format!(
                            "total variance {} at fixing {} for factor {} is not a finite non-decreasing value",
                            w, i, f
                        ),
                    });
                }
                std_devs[(i, f)] = (w - prev).sqrt();
                prev = w;
            }
        }

        Ok(Self {
            rng,
            std_devs,
            chol,
            normals: vec![0.0; n_times * n_factors],
            correlated: vec![0.0; n_factors],
        })
    }
}

impl PathGenerator for EulerPathGenerator {
    fn n_times(&self) -> usize {
        self.std_devs.n_rows()
    }

    fn n_factors(&self) -> usize {
        self.std_devs.n_cols()
    }

    fn next(&mut self, path: &mut PathMatrix) -> Result<(), ConfigError> {
        let n_times = self.n_times();
        let n_factors = self.n_factors();
        path.resize(n_times, n_factors);
        self.rng.next(&mut self.normals)?;

        for i in 0..n_times {
            let z = &self.normals[i * n_factors..(i + 1) * n_factors];
            match &self.chol {
                Some(l) => {
                    for (a, c) in self.correlated.iter_mut().enumerate() {
                        *c = l.row(a)[..=a].iter().zip(z).map(|(lij, zj)| lij * zj).sum();
                    }
                }
                None => self.correlated.copy_from_slice(z),
            }
            for f in 0..n_factors {
                let prev = if i == 0 { 0.0 } else { path[(i - 1, f)] };
                path[(i, f)] = prev + self.std_devs[(i, f)] * self.correlated[f];
            }
        }
        Ok(())
    }
}

/// Antithetic decorator over any path generator.
///
/// Odd calls draw a fresh trial from the wrapped generator and cache it;
/// even calls return the cached trial negated without consulting the
/// wrapped generator. The alternation depends only on call parity.
///
/// The wrapped generator must produce sign-symmetric (log-return) paths.
///
/// # Examples
///
/// ```rust
/// use pricer_core::math::Matrix;
/// use pricer_pricing::mc::{AntitheticPathGenerator, EulerPathGenerator, PathGenerator, UrngType};
/// use pricer_pricing::rng::NormalRng;
///
/// let variances = Matrix::from_rows(&[vec![0.04, 0.09]]);
/// let rng = NormalRng::new(UrngType::Mt19937, 2, None).unwrap();
/// let mut gen = AntitheticPathGenerator::new(EulerPathGenerator::new(rng, &variances, None).unwrap());
///
/// let (mut p1, mut p2) = (Matrix::default(), Matrix::default());
/// gen.next(&mut p1).unwrap();
/// gen.next(&mut p2).unwrap();
/// p2.scale(-1.0);
/// assert_eq!(p1, p2);
/// ```
#[derive(Debug, Clone)]
pub struct AntitheticPathGenerator<G> {
    inner: G,
    cached: PathMatrix,
    mirror_next: bool,
}

impl<G: PathGenerator> AntitheticPathGenerator<G> {
    /// Wrap `inner`.
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            cached: PathMatrix::default(),
            mirror_next: false,
        }
    }

    /// The wrapped generator.
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: PathGenerator> PathGenerator for AntitheticPathGenerator<G> {
    fn n_times(&self) -> usize {
        self.inner.n_times()
    }

    fn n_factors(&self) -> usize {
        self.inner.n_factors()
    }

    fn next(&mut self, path: &mut PathMatrix) -> Result<(), ConfigError> {
        if self.mirror_next {
            path.copy_from(&self.cached);
            path.scale(-1.0);
        } else {
            self.inner.next(path)?;
            self.cached.copy_from(path);
        }
        self.mirror_next = !self.mirror_next;
        Ok(())
    }
}

/// Path generators selectable from the run configuration.
#[derive(Debug, Clone)]
pub enum McPathGenerator {
    /// Plain Euler scheme
    Euler(EulerPathGenerator),
    /// Euler scheme with antithetic mirroring
    Antithetic(AntitheticPathGenerator<EulerPathGenerator>),
}

impl PathGenerator for McPathGenerator {
    fn n_times(&self) -> usize {
        match self {
            McPathGenerator::Euler(g) => g.n_times(),
            McPathGenerator::Antithetic(g) => g.n_times(),
        }
    }

    fn n_factors(&self) -> usize {
        match self {
            McPathGenerator::Euler(g) => g.n_factors(),
            McPathGenerator::Antithetic(g) => g.n_factors(),
        }
    }

    fn next(&mut self, path: &mut PathMatrix) -> Result<(), ConfigError> {
        match self {
            McPathGenerator::Euler(g) => g.next(path),
            McPathGenerator::Antithetic(g) => g.next(path),
        }
    }
}

/// Validate a correlation matrix and return its lower Cholesky factor.
///
/// # Errors
///
/// `InvalidParameter` unless the matrix is `n x n`, symmetric, has a unit
/// diagonal, entries in [-1, 1] and is positive definite.
pub fn correlation_cholesky(correlation: &Matrix, n: usize) -> Result<Matrix, ConfigError> {
    let invalid = |value: String| ConfigError::InvalidParameter {
        name: "correlation",
        value,
    };
    if correlation.n_rows() != n || correlation.n_cols() != n {
        return Err(invalid(format!(
            "matrix is {}x{}, expected {}x{}",
            correlation.n_rows(),
            correlation.n_cols(),
            n,
            n
        )));
    }
    for i in 0..n {
        if (correlation[(i, i)] - 1.0).abs() > CORRELATION_TOLERANCE {
            return Err(invalid(format!("diagonal entry {} is not 1", i)));
        }
        for j in 0..i {
            let c = correlation[(i, j)];
            if !(-1.0..=1.0).contains(&c) {
                return Err(invalid(format!("entry ({}, {}) = {} outside [-1, 1]", i, j, c)));
            }
            if (c - correlation[(j, i)]).abs() > CORRELATION_TOLERANCE {
                return Err(invalid(format!("entries ({}, {}) and ({}, {}) differ", i, j, j, i)));
            }
        }
    }
    let chol = DMatrix::from_row_slice(n, n, correlation.as_slice())
        .cholesky()
        .ok_or_else(|| invalid("matrix is not positive definite".to_string()))?;
    let l = chol.l();
    let mut out = Matrix::new(n, n);
    for i in 0..n {
        for j in 0..=i {
            out[(i, j)] = l[(i, j)];
        }
    }
    Ok(out)
}
