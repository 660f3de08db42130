//! Pricing call surface.
//!
//! These functions resolve market objects by name from an explicitly passed
//! [`MarketStore`], build the contract from its [`ContractSpec`], pick the
//! Monte Carlo driver the contract supports and return the estimate:
//!
//! - contracts with whole-path evaluation go to [`McPricer`]
//! - stepwise-only contracts (Bermudan, American) go to [`LsmPricer`]

use crate::mc::{ConfigError, LsmPricer, McError, McParams, McPricer, PricingResult, UrngType};
use crate::rng::{LowDiscrepancySequence, NormalRng, SobolSequence, SOBOL_MAX_DIMENSIONS};
use crate::stats::MeanVarCalculator;
use pricer_core::market_data::{MarketStore, VolEnum};
use pricer_core::math::Matrix;
use pricer_models::products::{ContractSpec, Product, ProductError};
use std::sync::Arc;
use tracing::{debug, info};

/// Price a single-asset contract.
///
/// # Arguments
///
/// * `market` - Store holding the named curve and volatility
/// * `contract` - Contract description
/// * `discount_curve` - Name or tag of the discount curve
/// * `dividend_yield` - Continuous dividend yield
/// * `vol` - Name or tag of the volatility term structure
/// * `spot` - Current asset price
/// * `mc_params` - Simulation configuration
/// * `n_paths` - Number of trials (antithetic pairs count as one)
///
/// # Errors
///
/// `InvalidParameter` if `n_paths` is zero, `MarketData(NotFound)` for an
/// unknown name, plus any construction or simulation error.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::{CurveEnum, MarketStore, VolEnum};
/// use pricer_models::products::{ContractSpec, PayoffType};
/// use pricer_pricing::api::price;
/// use pricer_pricing::mc::McParams;
///
/// let mut market = MarketStore::new();
/// market.yield_curves.set("USD", CurveEnum::flat(0.05)).unwrap();
/// market.volatilities.set("SPX", VolEnum::flat(0.2)).unwrap();
///
/// let contract = ContractSpec::European {
///     payoff: PayoffType::Call,
///     strike: 100.0,
///     time_to_exp: 1.0,
/// };
/// let result = price(
///     &market, &contract, "USD", 0.0, "SPX", 100.0, &McParams::default(), 10_000,
/// )
/// .unwrap();
/// assert!((result.mean - 10.45).abs() < 0.5);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn price(
    market: &MarketStore,
    contract: &ContractSpec,
    discount_curve: &str,
    dividend_yield: f64,
    vol: &str,
    spot: f64,
    mc_params: &McParams,
    n_paths: usize,
) -> Result<PricingResult, McError> {
    check_paths(n_paths)?;
    let curve = market.yield_curves.get(discount_curve)?;
    let vol = market.volatilities.get(vol)?;
    debug!(discount_curve, "resolved market data");
    let product = contract.build()?;

    let mut acc = MeanVarCalculator::new(1);
    if product.supports_path_eval() {
        let mut pricer =
            McPricer::new(product, &*curve, dividend_yield, &*vol, spot, mc_params)?;
        pricer.simulate(&mut acc, n_paths)?;
    } else {
        let mut pricer =
            LsmPricer::new(product, &*curve, dividend_yield, &*vol, spot, mc_params)?;
        pricer.simulate(&mut acc, n_paths)?;
    }
    let result = PricingResult::from_accumulator(&acc, 0);
    info!(mean = result.mean, std_err = result.std_err, n_paths, "priced contract");
    Ok(result)
}

/// Price a multi-asset contract on correlated assets.
///
/// Per-asset inputs are given in the contract's asset order; `vols` are
/// names or tags in the store.
///
/// # Errors
///
/// As [`price`], plus `Product(UnsupportedOperation)` for contracts without
/// whole-path evaluation and `Config(InvalidParameter)` for an invalid
/// correlation matrix.
#[allow(clippy::too_many_arguments)]
pub fn price_basket(
    market: &MarketStore,
    contract: &ContractSpec,
    discount_curve: &str,
    dividend_yields: &[f64],
    vols: &[&str],
    spots: &[f64],
    correlation: &Matrix,
    mc_params: &McParams,
    n_paths: usize,
) -> Result<PricingResult, McError> {
    check_paths(n_paths)?;
    let curve = market.yield_curves.get(discount_curve)?;
    let vols = vols
        .iter()
        .map(|name| market.volatilities.get(name))
        .collect::<Result<Vec<Arc<VolEnum<f64>>>, _>>()?;
    let vol_refs: Vec<&VolEnum<f64>> = vols.iter().map(|v| &**v).collect();
    debug!(discount_curve, n_assets = vols.len(), "resolved market data");
    let product = contract.build()?;
    if !product.supports_path_eval() {
        return Err(ProductError::UnsupportedOperation {
            product: product.type_name(),
            operation: "whole-path",
        }
        .into());
    }

    let mut pricer = McPricer::multi_asset(
        product,
        &*curve,
        dividend_yields,
        &vol_refs,
        spots,
        correlation,
        mc_params,
    )?;
    let mut acc = MeanVarCalculator::new(1);
    pricer.simulate(&mut acc, n_paths)?;
    let result = PricingResult::from_accumulator(&acc, 0);
    info!(mean = result.mean, std_err = result.std_err, n_paths, "priced basket contract");
    Ok(result)
}

/// First `n_points` points of the Sobol sequence in `n_dims` dimensions,
/// one point per row, optionally mapped to standard normals.
///
/// # Errors
///
/// `TooManyDimensions` unless `1 <= n_dims <= SOBOL_MAX_DIMENSIONS`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::api::sobol_sequence;
///
/// let points = sobol_sequence(2, 3, false).unwrap();
/// assert_eq!(points.row(0), &[0.5, 0.5, 0.5]);
/// assert_eq!(points.row(1), &[0.75, 0.25, 0.25]);
/// ```
pub fn sobol_sequence(n_points: usize, n_dims: usize, normal: bool) -> Result<Matrix, ConfigError> {
    let mut out = Matrix::new(n_points, n_dims);
    if normal {
        let mut rng = NormalRng::new(UrngType::Sobol, n_dims, None)?;
        for i in 0..n_points {
            rng.next(out.row_mut(i))?;
        }
    } else {
        let mut seq = SobolSequence::new(n_dims).ok_or(ConfigError::TooManyDimensions {
            requested: n_dims,
            max: SOBOL_MAX_DIMENSIONS,
        })?;
        for i in 0..n_points {
            out.row_mut(i).copy_from_slice(seq.next_point());
        }
    }
    Ok(out)
}

fn check_paths(n_paths: usize) -> Result<(), McError> {
    if n_paths == 0 {
        return Err(McError::InvalidParameter {
            name: "n_paths",
            value: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::math::distributions::inverse_norm_cdf;
    use pricer_core::market_data::{CurveEnum, MarketDataError};
    use pricer_models::products::PayoffType;

    fn market() -> MarketStore {
        let mut market = MarketStore::new();
        market.yield_curves.set("USD", CurveEnum::flat(0.02)).unwrap();
        market.volatilities.set("SPX", VolEnum::flat(0.2)).unwrap();
        market.volatilities.set("NDX", VolEnum::flat(0.3)).unwrap();
        market
    }

    fn european() -> ContractSpec {
        ContractSpec::European {
            payoff: PayoffType::Put,
            strike: 100.0,
            time_to_exp: 1.0,
        }
    }

    #[test]
    fn test_zero_paths_checked_first() {
        // Rejected before the unknown curve name is looked up
        let err = price(
            &MarketStore::new(),
            &european(),
            "NOPE",
            0.0,
            "NOPE",
            100.0,
            &McParams::default(),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, McError::InvalidParameter { name: "n_paths", .. }));
    }

    #[test]
    fn test_unknown_names_fail_fast() {
        let market = market();
        let err = price(
            &market,
            &european(),
            "EUR",
            0.0,
            "SPX",
            100.0,
            &McParams::default(),
            10,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            McError::MarketData(MarketDataError::NotFound { .. })
        ));
        let err = price(
            &market,
            &european(),
            "USD",
            0.0,
            "SPX~7",
            100.0,
            &McParams::default(),
            10,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            McError::MarketData(MarketDataError::NotFound { .. })
        ));
    }

    #[test]
    fn test_stepwise_contract_routed_to_regression() {
        let contract = ContractSpec::American {
            payoff: PayoffType::Put,
            strike: 100.0,
            time_to_exp: 1.0,
            n_exercise: 10,
        };
        let american = price(
            &market(),
            &contract,
            "usd",
            0.0,
            "spx",
            100.0,
            &McParams::default(),
            5_000,
        )
        .unwrap();
        let european = price(
            &market(),
            &european(),
            "USD~1",
            0.0,
            "SPX~1",
            100.0,
            &McParams::default(),
            5_000,
        )
        .unwrap();
        assert!(american.mean > european.mean - 3.0 * european.std_err);
    }

    #[test]
    fn test_basket_rejects_stepwise_contract() {
        let contract = ContractSpec::Bermudan {
            payoff: PayoffType::Put,
            strike: 100.0,
            exercise_times: vec![0.5, 1.0],
        };
        let err = price_basket(
            &market(),
            &contract,
            "USD",
            &[0.0],
            &["SPX"],
            &[100.0],
            &Matrix::filled(1, 1, 1.0),
            &McParams::default(),
            10,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            McError::Product(ProductError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_basket_prices_asian() {
        let contract = ContractSpec::AsianBasket {
            payoff: PayoffType::Call,
            strike: 100.0,
            fix_times: vec![0.25, 0.5, 0.75, 1.0],
            weights: vec![0.5, 0.5],
        };
        let corr = Matrix::from_rows(&[vec![1.0, 0.5], vec![0.5, 1.0]]);
        let result = price_basket(
            &market(),
            &contract,
            "USD",
            &[0.0, 0.01],
            &["SPX", "NDX"],
            &[100.0, 100.0],
            &corr,
            &McParams::default(),
            5_000,
        )
        .unwrap();
        assert!(result.mean > 0.0 && result.mean < 15.0);
        assert!(result.std_err > 0.0);
    }

    #[test]
    fn test_sobol_sequence_points() {
        let points = sobol_sequence(5, 3, false).unwrap();
        assert_eq!(points.row(2), &[0.25, 0.75, 0.75]);
        assert_eq!(points.row(3), &[0.375, 0.375, 0.625]);
        assert_eq!(points.row(4), &[0.875, 0.875, 0.125]);

        let normals = sobol_sequence(5, 3, true).unwrap();
        assert_eq!(normals.row(0), &[0.0, 0.0, 0.0]);
        assert_eq!(normals[(1, 0)], inverse_norm_cdf(0.75));

        assert!(matches!(
            sobol_sequence(1, SOBOL_MAX_DIMENSIONS + 1, false),
            Err(ConfigError::TooManyDimensions { requested: 21_202, .. })
        ));
        assert!(sobol_sequence(1, 0, true).is_err());
    }
}
