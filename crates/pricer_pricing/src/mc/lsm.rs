//! Regression Monte Carlo (Longstaff-Schwartz) for early-exercise contracts.
//!
//! Contracts that only support stepwise evaluation are priced in two passes:
//!
//! 1. **Calibration**: simulate a batch of paths and sweep backwards through
//!    the fixing grid. At each non-terminal fixing the discounted realised
//!    cashflows of in-the-money paths are regressed on `[1, x, x²]` with
//!    `x = S / S₀`, giving an estimate of the continuation value.
//! 2. **Pricing**: simulate fresh paths and run the contract's
//!    [`Product::eval_step`] backwards on each, feeding it the fitted
//!    continuation values. The resulting payment amounts are discounted and
//!    accumulated.
//!
//! Pricing paths never enter the regression, so the estimate is a
//! low-biased lower bound for the optimal exercise value.

use super::config::McParams;
use super::error::McError;
use super::paths::{McPathGenerator, PathGenerator};
use super::pricer::check_run;
use super::setup::{build_path_generator, discount_factors, discounted_sum, SimulationSetup};
use crate::stats::MeanVarCalculator;
use nalgebra::{Matrix3, Vector3};
use pricer_core::market_data::{VolatilityTermStructure, YieldCurve};
use pricer_core::math::PathMatrix;
use pricer_models::products::{Product, ProductError};
use tracing::{debug, info_span, warn};

/// Minimum number of in-the-money paths for a quadratic fit.
const MIN_REGRESSION_PATHS: usize = 3;

/// Spread of regressors below which only a constant is fitted.
const DEGENERATE_SPREAD: f64 = 1e-12;

/// Fitted continuation value at one fixing, in valuation-date money.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Continuation {
    /// Too few in-the-money paths: always hold.
    Hold,
    /// `β₀ + β₁x + β₂x²`.
    Quadratic(Vector3<f64>),
}

/// Least-squares Monte Carlo pricer for single-asset stepwise contracts.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::{FlatCurve, FlatVol};
/// use pricer_models::products::{BermudanCallPut, PayoffType};
/// use pricer_pricing::mc::{LsmPricer, McParams, PricingResult};
/// use pricer_pricing::stats::MeanVarCalculator;
///
/// let product = BermudanCallPut::american(PayoffType::Put, 100.0, 1.0, 10).unwrap();
/// let mut pricer = LsmPricer::new(
///     product,
///     &FlatCurve::new(0.05),
///     0.0,
///     &FlatVol::new(0.2),
///     100.0,
///     &McParams::default(),
/// )
/// .unwrap();
///
/// let mut acc = MeanVarCalculator::new(1);
/// pricer.simulate(&mut acc, 5_000).unwrap();
/// let result = PricingResult::from_accumulator(&acc, 0);
/// assert!(result.mean > 5.5 && result.mean < 6.5);
/// ```
#[derive(Debug, Clone)]
pub struct LsmPricer<P: Product> {
    product: P,
    params: McParams,
    path_gen: McPathGenerator,
    setup: SimulationSetup,
    spot: f64,
    pay_discounts: Vec<f64>,
    /// One entry per non-terminal fixing once calibrated.
    continuation: Option<Vec<Continuation>>,
    log_path: PathMatrix,
    spot_path: PathMatrix,
}

impl<P: Product> LsmPricer<P> {
    /// Build the pricer.
    ///
    /// # Errors
    ///
    /// - `Product(UnsupportedOperation)` unless the contract supports
    ///   stepwise evaluation on a single asset with one payment per fixing
    /// - `MarketData` if the curve or volatility rejects a schedule time
    /// - `Config` if the generator cannot be built
    /// - `InvalidParameter` for a non-positive spot
    pub fn new<C, V>(
        product: P,
        discount_curve: &C,
        dividend_yield: f64,
        vol: &V,
        spot: f64,
        params: &McParams,
    ) -> Result<Self, McError>
    where
        C: YieldCurve<f64>,
        V: VolatilityTermStructure<f64>,
    {
        if !product.supports_step_eval()
            || product.n_assets() != 1
            || product.pay_times().len() != product.fix_times().len()
        {
            return Err(ProductError::UnsupportedOperation {
                product: product.type_name(),
                operation: "single-asset regression",
            }
            .into());
        }
        let setup = SimulationSetup::new(
            product.fix_times(),
            discount_curve,
            &[dividend_yield],
            &[vol],
            &[spot],
            1,
        )?;
        let pay_discounts = discount_factors(discount_curve, product.pay_times())?;
        let path_gen = build_path_generator(params, &setup.variances, None)?;
        Ok(Self {
            product,
            params: params.clone(),
            path_gen,
            setup,
            spot,
            pay_discounts,
            continuation: None,
            log_path: PathMatrix::default(),
            spot_path: PathMatrix::default(),
        })
    }

    /// Number of values accumulated per trial.
    #[inline]
    pub fn n_variables(&self) -> usize {
        1
    }

    /// The priced contract.
    #[inline]
    pub fn product(&self) -> &P {
        &self.product
    }

    /// Whether the exercise policy has been fitted.
    #[inline]
    pub fn is_calibrated(&self) -> bool {
        self.continuation.is_some()
    }

    /// Fit the exercise policy on `n_trials` simulated trials.
    ///
    /// With antithetic variance reduction each trial contributes both paths
    /// of its pair to the regression.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `n_trials` is zero; generator and contract
    /// errors are propagated.
    pub fn calibrate(&mut self, n_trials: usize) -> Result<(), McError> {
        if n_trials == 0 {
            return Err(McError::InvalidParameter {
                name: "n_trials",
                value: "must be at least 1".to_string(),
            });
        }
        let n_paths = if self.params.is_antithetic() {
            2 * n_trials
        } else {
            n_trials
        };
        let n_times = self.product.fix_times().len();

        // spots[p * n_times + i]
        let mut spots = Vec::with_capacity(n_paths * n_times);
        for _ in 0..n_paths {
            self.path_gen.next(&mut self.log_path)?;
            self.setup.to_spots(&self.log_path, &mut self.spot_path);
            spots.extend_from_slice(self.spot_path.as_slice());
        }

        let last = n_times - 1;
        // Valuation-date value of each path's cashflows under the current policy.
        let mut values = vec![0.0; n_paths];
        for (p, v) in values.iter_mut().enumerate() {
            let s = spots[p * n_times + last];
            self.product.eval_step(last, &[s], 0.0)?;
            *v = self.product.pay_amounts()[last] * self.pay_discounts[last];
        }

        let mut continuation = vec![Continuation::Hold; last];
        let mut itm = Vec::with_capacity(n_paths);
        for idx in (0..last).rev() {
            itm.clear();
            for p in 0..n_paths {
                let s = spots[p * n_times + idx];
                if self.product.intrinsic(idx, &[s])? > 0.0 {
                    itm.push(p);
                }
            }
            let fit = self.regress(&itm, &spots, n_times, idx, &values);
            continuation[idx] = fit;

            for &p in &itm {
                let s = spots[p * n_times + idx];
                let cont = self.continuation_value(fit, idx, s);
                self.product.eval_step(idx, &[s], cont)?;
                let exercised = self.product.pay_amounts()[idx];
                if exercised > 0.0 {
                    values[p] = exercised * self.pay_discounts[idx];
                }
            }
        }

        debug!(
            n_paths,
            n_times,
            n_fitted = continuation
                .iter()
                .filter(|c| matches!(c, Continuation::Quadratic(_)))
                .count(),
            "fitted exercise policy"
        );
        self.continuation = Some(continuation);
        Ok(())
    }

    /// Price `n_trials` out-of-sample trials into `acc`, calibrating first on
    /// `n_trials` separate trials if no policy has been fitted yet.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `n_trials` is zero or `acc` has the wrong
    /// width; generator and contract errors are propagated.
    pub fn simulate(
        &mut self,
        acc: &mut MeanVarCalculator,
        n_trials: usize,
    ) -> Result<(), McError> {
        check_run(acc, self.n_variables(), n_trials)?;
        let span = info_span!(
            "lsm_simulate",
            product = self.product.type_name(),
            urng = %self.params.urng_type(),
            control_var = %self.params.control_var_type(),
            n_trials
        );
        let _guard = span.enter();

        if self.continuation.is_none() {
            self.calibrate(n_trials)?;
        }
        let antithetic = self.params.is_antithetic();
        for _ in 0..n_trials {
            let value = if antithetic {
                let fresh = self.trial_value()?;
                let mirrored = self.trial_value()?;
                0.5 * (fresh + mirrored)
            } else {
                self.trial_value()?
            };
            acc.add(&[value]);
        }
        Ok(())
    }

    fn trial_value(&mut self) -> Result<f64, McError> {
        self.path_gen.next(&mut self.log_path)?;
        self.setup.to_spots(&self.log_path, &mut self.spot_path);
        let last = self.spot_path.n_rows() - 1;
        for idx in (0..=last).rev() {
            let s = self.spot_path[(idx, 0)];
            let cont = match (&self.continuation, idx < last) {
                (Some(fits), true) => self.continuation_value(fits[idx], idx, s),
                _ => 0.0,
            };
            self.product.eval_step(idx, &[s], cont)?;
        }
        Ok(discounted_sum(
            self.product.pay_amounts(),
            &self.pay_discounts,
        ))
    }

    /// Continuation value at fixing `idx` in payment-date money, floored at zero.
    fn continuation_value(&self, fit: Continuation, idx: usize, s: f64) -> f64 {
        match fit {
            Continuation::Hold => f64::INFINITY,
            Continuation::Quadratic(beta) => {
                let x = s / self.spot;
                let fitted = beta[0] + beta[1] * x + beta[2] * x * x;
                (fitted / self.pay_discounts[idx]).max(0.0)
            }
        }
    }

    fn regress(
        &self,
        itm: &[usize],
        spots: &[f64],
        n_times: usize,
        idx: usize,
        values: &[f64],
    ) -> Continuation {
        if itm.len() < MIN_REGRESSION_PATHS {
            return Continuation::Hold;
        }
        let mut s1 = 0.0_f64;
        let mut s_x = 0.0_f64;
        let mut s_x2 = 0.0_f64;
        let mut s_x3 = 0.0_f64;
        let mut s_x4 = 0.0_f64;
        let mut s_y = 0.0_f64;
        let mut s_xy = 0.0_f64;
        let mut s_x2y = 0.0_f64;
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;

        for &p in itm {
            let x = spots[p * n_times + idx] / self.spot;
            let x2 = x * x;
            let y = values[p];
            s1 += 1.0;
            s_x += x;
            s_x2 += x2;
            s_x3 += x2 * x;
            s_x4 += x2 * x2;
            s_y += y;
            s_xy += x * y;
            s_x2y += x2 * y;
            x_min = x_min.min(x);
            x_max = x_max.max(x);
        }

        let constant = Continuation::Quadratic(Vector3::new(s_y / s1, 0.0, 0.0));
        if x_max - x_min < DEGENERATE_SPREAD {
            return constant;
        }
        let xtx = Matrix3::new(s1, s_x, s_x2, s_x, s_x2, s_x3, s_x2, s_x3, s_x4);
        let xty = Vector3::new(s_y, s_xy, s_x2y);
        match xtx.lu().solve(&xty) {
            Some(beta) if beta.iter().all(|b| b.is_finite()) => Continuation::Quadratic(beta),
            _ => {
                warn!(idx, "singular regression, using constant continuation");
                constant
            }
        }
    }
}
