//! Monte Carlo pricing engine for whole-path contracts.
//!
//! # Overview
//!
//! The [`McPricer`] coordinates, for every trial:
//! 1. Path generation (via [`McPathGenerator`]) in log-return space
//! 2. Mapping the log path to price levels on the fixing grid
//! 3. Contract evaluation (via [`Product::eval_path`])
//! 4. Discounting of each payment amount to the valuation date
//! 5. Accumulation of the summed present value
//!
//! With antithetic variance reduction one trial is a fresh/mirrored pair
//! and the accumulated sample is the pair average, so the reported standard
//! error accounts for the correlation inside each pair.
//!
//! # Workspace Reuse
//!
//! The log path and price path buffers are owned by the pricer and reused
//! across trials.

use super::config::McParams;
use super::error::McError;
use super::paths::{correlation_cholesky, McPathGenerator, PathGenerator};
use super::setup::{build_path_generator, discount_factors, discounted_sum, SimulationSetup};
use crate::stats::MeanVarCalculator;
use pricer_core::market_data::{VolatilityTermStructure, YieldCurve};
use pricer_core::math::{Matrix, PathMatrix};
use pricer_models::products::{Product, ProductError};
use tracing::{debug, info_span};

/// Forward Monte Carlo pricer.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::{FlatCurve, FlatVol};
/// use pricer_models::products::{EuropeanCallPut, PayoffType};
/// use pricer_pricing::mc::{McParams, McPricer, PricingResult};
/// use pricer_pricing::stats::MeanVarCalculator;
///
/// let product = EuropeanCallPut::new(PayoffType::Call, 100.0, 1.0).unwrap();
/// let curve = FlatCurve::new(0.05);
/// let vol = FlatVol::new(0.2);
/// let params = McParams::default();
///
/// let mut pricer = McPricer::new(product, &curve, 0.0, &vol, 100.0, &params).unwrap();
/// let mut acc = MeanVarCalculator::new(pricer.n_variables());
/// pricer.simulate(&mut acc, 20_000).unwrap();
///
/// let result = PricingResult::from_accumulator(&acc, 0);
/// assert!((result.mean - 10.45).abs() < 4.0 * result.std_err + 0.05);
/// ```
#[derive(Debug, Clone)]
pub struct McPricer<P: Product> {
    product: P,
    params: McParams,
    path_gen: McPathGenerator,
    setup: SimulationSetup,
    pay_discounts: Vec<f64>,
    log_path: PathMatrix,
    spot_path: PathMatrix,
}

impl<P: Product> McPricer<P> {
    /// Single-asset pricer.
    ///
    /// # Errors
    ///
    /// - `Product(UnsupportedOperation)` if the contract has no whole-path evaluation
    /// - `MarketData` if the curve or volatility rejects a fixing or payment time
    /// - `Config` if the generator cannot be built (e.g. too many Sobol dimensions)
    /// - `InvalidParameter` for a non-positive spot or a multi-asset contract
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
        Self::build(
            product,
            discount_curve,
            &[dividend_yield],
            &[vol],
            &[spot],
            None,
            params,
        )
    }

    /// Multi-asset pricer with correlated log-normal assets.
    ///
    /// # Errors
    ///
    /// As [`McPricer::new`], plus `Config(InvalidParameter)` if `correlation`
    /// is not a valid correlation matrix for the contract's assets.
    pub fn multi_asset<C, V>(
        product: P,
        discount_curve: &C,
        dividend_yields: &[f64],
        vols: &[&V],
        spots: &[f64],
        correlation: &Matrix,
        params: &McParams,
    ) -> Result<Self, McError>
    where
        C: YieldCurve<f64>,
        V: VolatilityTermStructure<f64>,
    {
        let chol = correlation_cholesky(correlation, product.n_assets())?;
        Self::build(
            product,
            discount_curve,
            dividend_yields,
            vols,
            spots,
            Some(chol),
            params,
        )
    }

    fn build<C, V>(
        product: P,
        discount_curve: &C,
        dividend_yields: &[f64],
        vols: &[&V],
        spots: &[f64],
        chol: Option<Matrix>,
        params: &McParams,
    ) -> Result<Self, McError>
    where
        C: YieldCurve<f64>,
        V: VolatilityTermStructure<f64>,
    {
        if !product.supports_path_eval() {
            return Err(ProductError::UnsupportedOperation {
                product: product.type_name(),
                operation: "whole-path",
            }
            .into());
        }
        let setup = SimulationSetup::new(
            product.fix_times(),
            discount_curve,
            dividend_yields,
            vols,
            spots,
            product.n_assets(),
        )?;
        let pay_discounts = discount_factors(discount_curve, product.pay_times())?;
        let path_gen = build_path_generator(params, &setup.variances, chol)?;
        debug!(
            product = product.type_name(),
            n_times = path_gen.n_times(),
            n_factors = path_gen.n_factors(),
            "built Monte Carlo pricer"
        );
        Ok(Self {
            product,
            params: params.clone(),
            path_gen,
            setup,
            pay_discounts,
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

    /// Run configuration.
    #[inline]
    pub fn params(&self) -> &McParams {
        &self.params
    }

    /// Simulate `n_trials` trials into `acc`.
    ///
    /// Successive calls continue the random stream, so two calls of `n`
    /// trials accumulate the same samples as one call of `2n`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `n_trials` is zero or `acc` does not track
    /// [`McPricer::n_variables`] variables; contract evaluation errors are
    /// propagated and abort the run.
    pub fn simulate(
        &mut self,
        acc: &mut MeanVarCalculator,
        n_trials: usize,
    ) -> Result<(), McError> {
        check_run(acc, self.n_variables(), n_trials)?;
        let span = info_span!(
            "mc_simulate",
            product = self.product.type_name(),
            urng = %self.params.urng_type(),
            control_var = %self.params.control_var_type(),
            n_trials
        );
        let _guard = span.enter();

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
        debug!(n_samples = acc.n_samples(), "simulation finished");
        Ok(())
    }

    fn trial_value(&mut self) -> Result<f64, McError> {
        self.path_gen.next(&mut self.log_path)?;
        self.setup.to_spots(&self.log_path, &mut self.spot_path);
        self.product.eval_path(&self.spot_path)?;
        Ok(discounted_sum(
            self.product.pay_amounts(),
            &self.pay_discounts,
        ))
    }
}

/// Common run argument checks.
pub(crate) fn check_run(
    acc: &MeanVarCalculator,
    n_variables: usize,
    n_trials: usize,
) -> Result<(), McError> {
    if n_trials == 0 {
        return Err(McError::InvalidParameter {
            name: "n_trials",
            value: "must be at least 1".to_string(),
        });
    }
    if acc.n_variables() != n_variables {
        return Err(McError::InvalidParameter {
            name: "accumulator",
            value: format!(
                "tracks {} variables, pricer produces {}",
                acc.n_variables(),
                n_variables
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::{ControlVarType, UrngType};
    use approx::assert_relative_eq;
    use pricer_core::market_data::{FlatCurve, FlatVol};
    use pricer_models::analytical::european_option_bs;
    use pricer_models::products::{
        AsianBasketCallPut, BermudanCallPut, EuropeanCallPut, PayoffType, WorstOfDigitalCallPut,
    };

    fn run<P: Product>(mut pricer: McPricer<P>, n: usize) -> (f64, f64) {
        let mut acc = MeanVarCalculator::new(1);
        pricer.simulate(&mut acc, n).unwrap();
        let r = crate::mc::PricingResult::from_accumulator(&acc, 0);
        (r.mean, r.std_err)
    }

    // ==========================================================
    // Construction
    // ==========================================================

    #[test]
    fn test_stepwise_only_contract_rejected() {
        let product = BermudanCallPut::new(PayoffType::Put, 100.0, vec![0.5, 1.0]).unwrap();
        let err = McPricer::new(
            product,
            &FlatCurve::new(0.0),
            0.0,
            &FlatVol::new(0.2),
            100.0,
            &McParams::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            McError::Product(ProductError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_sobol_many_fixings_matches_pseudo_random() {
        // 22 fixings of a single asset: one 22-dimensional point per trial
        let asian = || {
            AsianBasketCallPut::new(
                PayoffType::Call,
                100.0,
                (1..=22).map(|i| i as f64 / 22.0).collect(),
                vec![1.0],
            )
            .unwrap()
        };
        let build = |urng| {
            McPricer::new(
                asian(),
                &FlatCurve::new(0.0),
                0.0,
                &FlatVol::new(0.2),
                100.0,
                &McParams::builder().urng_type(urng).build(),
            )
            .unwrap()
        };
        let (sobol, _) = run(build(UrngType::Sobol), 4096);
        let (mt, mt_se) = run(build(UrngType::Mt19937), 20_000);
        assert!((sobol - mt).abs() < 4.0 * mt_se, "{} vs {}", sobol, mt);
    }

    #[test]
    fn test_zero_trials_rejected() {
        let product = EuropeanCallPut::new(PayoffType::Call, 100.0, 1.0).unwrap();
        let mut pricer = McPricer::new(
            product,
            &FlatCurve::new(0.0),
            0.0,
            &FlatVol::new(0.2),
            100.0,
            &McParams::default(),
        )
        .unwrap();
        let mut acc = MeanVarCalculator::new(1);
        assert!(matches!(
            pricer.simulate(&mut acc, 0),
            Err(McError::InvalidParameter { name: "n_trials", .. })
        ));
        assert_eq!(acc.n_samples(), 0);
    }

    // ==========================================================
    // Pricing
    // ==========================================================

    #[test]
    fn test_european_vs_black_scholes_all_generators() {
        let bs = european_option_bs(PayoffType::Put, 100.0, 95.0, 0.5, 0.03, 0.01, 0.25)
            .unwrap()
            .price;
        for urng in [
            UrngType::MinStdRand,
            UrngType::Mt19937,
            UrngType::Ranlux3,
            UrngType::Ranlux4,
            UrngType::Sobol,
        ] {
            let product = EuropeanCallPut::new(PayoffType::Put, 95.0, 0.5).unwrap();
            let params = McParams::builder().urng_type(urng).build();
            let pricer = McPricer::new(
                product,
                &FlatCurve::new(0.03),
                0.01,
                &FlatVol::new(0.25),
                100.0,
                &params,
            )
            .unwrap();
            let (mean, se) = run(pricer, 20_000);
            assert!(
                (mean - bs).abs() < 4.0 * se + 1e-3,
                "{:?}: mc {} vs bs {} (se {})",
                urng,
                mean,
                bs,
                se
            );
        }
    }

    #[test]
    fn test_zero_vol_is_deterministic_forward_payoff() {
        let product = EuropeanCallPut::new(PayoffType::Call, 90.0, 2.0).unwrap();
        let curve = FlatCurve::new(0.04);
        let pricer = McPricer::new(
            product,
            &curve,
            0.01,
            &FlatVol::new(0.0),
            100.0,
            &McParams::default(),
        )
        .unwrap();
        let (mean, se) = run(pricer, 100);
        let df = (-0.08_f64).exp();
        let fwd = 100.0 * 0.06_f64.exp();
        assert_relative_eq!(mean, df * (fwd - 90.0), epsilon = 1e-10);
        assert_eq!(se, 0.0);
    }

    #[test]
    fn test_antithetic_reduces_variance() {
        let make = |cv| {
            let product = EuropeanCallPut::new(PayoffType::Call, 100.0, 1.0).unwrap();
            let params = McParams::builder()
                .control_var_type(cv)
                .seed(2024)
                .build();
            McPricer::new(
                product,
                &FlatCurve::new(0.05),
                0.0,
                &FlatVol::new(0.3),
                100.0,
                &params,
            )
            .unwrap()
        };
        let n = 10_000;
        let (_, se_plain) = run(make(ControlVarType::None), n);
        let (_, se_anti) = run(make(ControlVarType::Antithetic), n);
        assert!(se_anti <= se_plain, "{} > {}", se_anti, se_plain);
    }

    #[test]
    fn test_worst_of_digital_perfect_correlation() {
        // With identical assets and unit correlation the worst-of is a single digital
        let product = WorstOfDigitalCallPut::new(PayoffType::Call, 1.0, 0.0, 1.0, 2).unwrap();
        let vol = FlatVol::new(0.2);
        let corr = Matrix::from_rows(&[vec![1.0, 0.999_999], vec![0.999_999, 1.0]]);
        let pricer = McPricer::multi_asset(
            product,
            &FlatCurve::new(0.02),
            &[0.0, 0.0],
            &[&vol, &vol],
            &[100.0, 100.0],
            &corr,
            &McParams::default(),
        )
        .unwrap();
        let (mean, se) = run(pricer, 20_000);
        let bs = pricer_models::analytical::digital_option_bs(
            PayoffType::Call,
            100.0,
            100.0,
            1.0,
            0.02,
            0.0,
            0.2,
        )
        .unwrap()
        .price;
        assert!((mean - bs).abs() < 4.0 * se + 2e-3, "{} vs {}", mean, bs);
    }

    #[test]
    fn test_simulate_continues_stream() {
        let make = || {
            McPricer::new(
                EuropeanCallPut::new(PayoffType::Call, 100.0, 1.0).unwrap(),
                &FlatCurve::new(0.01),
                0.0,
                &FlatVol::new(0.2),
                100.0,
                &McParams::default(),
            )
            .unwrap()
        };
        let mut a = make();
        let mut acc_a = MeanVarCalculator::new(1);
        a.simulate(&mut acc_a, 500).unwrap();
        a.simulate(&mut acc_a, 500).unwrap();

        let mut b = make();
        let mut acc_b = MeanVarCalculator::new(1);
        b.simulate(&mut acc_b, 1000).unwrap();
        assert_eq!(acc_a, acc_b);
    }
}
