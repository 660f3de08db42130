//! Market inputs resolved onto a contract's fixing grid.

use super::config::{McParams, PathGenType};
use super::error::McError;
use super::paths::{AntitheticPathGenerator, EulerPathGenerator, McPathGenerator};
use crate::rng::NormalRng;
use pricer_core::market_data::{VolatilityTermStructure, YieldCurve};
use pricer_core::math::{Matrix, PathMatrix};
use tracing::debug;

/// Deterministic part of the simulated log-prices.
#[derive(Debug, Clone)]
pub(crate) struct SimulationSetup {
    /// Total variance to each fixing (rows) per asset (columns).
    pub(crate) variances: Matrix,
    /// `ln F_i - w_i / 2` per fixing and asset.
    pub(crate) log_drifts: Matrix,
}

impl SimulationSetup {
    pub(crate) fn new<C, V>(
        fix_times: &[f64],
        curve: &C,
        dividend_yields: &[f64],
        vols: &[&V],
        spots: &[f64],
        n_assets: usize,
    ) -> Result<Self, McError>
    where
        C: YieldCurve<f64>,
        V: VolatilityTermStructure<f64>,
    {
        if spots.len() != n_assets || dividend_yields.len() != n_assets || vols.len() != n_assets
        {
            return Err(McError::InvalidParameter {
                name: "assets",
                value: format!(
                    "contract needs {} assets, got {} spots, {} dividend yields and {} volatilities",
                    n_assets,
                    spots.len(),
                    dividend_yields.len(),
                    vols.len()
                ),
            });
        }
        for &s in spots {
            if !(s > 0.0 && s.is_finite()) {
                return Err(McError::InvalidParameter {
                    name: "spot",
                    value: format!("{} is not a positive finite level", s),
                });
            }
        }
        for &q in dividend_yields {
            if !q.is_finite() {
                return Err(McError::InvalidParameter {
                    name: "dividend_yield",
                    value: format!("{} is not finite", q),
                });
            }
        }

        let n_times = fix_times.len();
        let mut variances = Matrix::new(n_times, n_assets);
        let mut log_drifts = Matrix::new(n_times, n_assets);
        for (i, &t) in fix_times.iter().enumerate() {
            let log_df = curve.discount(t)?.ln();
            for a in 0..n_assets {
                let w = vols[a].total_variance(t)?;
                variances[(i, a)] = w;
                log_drifts[(i, a)] = spots[a].ln() - dividend_yields[a] * t - log_df - 0.5 * w;
            }
        }
        debug!(n_times, n_assets, "resolved market inputs on fixing grid");
        Ok(Self {
            variances,
            log_drifts,
        })
    }

    /// Price levels `exp(log_drift + x)` for a simulated log path.
    pub(crate) fn to_spots(&self, log_path: &PathMatrix, spots: &mut PathMatrix) {
        spots.resize(log_path.n_rows(), log_path.n_cols());
        for ((s, &x), &d) in spots
            .as_mut_slice()
            .iter_mut()
            .zip(log_path.as_slice())
            .zip(self.log_drifts.as_slice())
        {
            *s = (d + x).exp();
        }
    }
}

/// Discount factors at `times`.
pub(crate) fn discount_factors<C: YieldCurve<f64>>(
    curve: &C,
    times: &[f64],
) -> Result<Vec<f64>, McError> {
    times
        .iter()
        .map(|&t| curve.discount(t).map_err(McError::from))
        .collect()
}

/// Path generator selected by `params`.
pub(crate) fn build_path_generator(
    params: &McParams,
    variances: &Matrix,
    chol: Option<Matrix>,
) -> Result<McPathGenerator, McError> {
    let dimension = variances.n_rows() * variances.n_cols();
    let rng = NormalRng::new(params.urng_type(), dimension, params.seed())?;
    let generator = match params.path_gen_type() {
        PathGenType::Euler => EulerPathGenerator::new(rng, variances, chol)?,
    };
    Ok(if params.is_antithetic() {
        McPathGenerator::Antithetic(AntitheticPathGenerator::new(generator))
    } else {
        McPathGenerator::Euler(generator)
    })
}

/// Present value of payment amounts.
#[inline]
pub(crate) fn discounted_sum(amounts: &[f64], discounts: &[f64]) -> f64 {
    amounts.iter().zip(discounts).map(|(a, d)| a * d).sum()
}
