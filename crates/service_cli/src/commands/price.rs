//! Price command implementation
//!
//! Prices the contract of a run file using the pricer_pricing engine.

use std::path::Path;

use pricer_models::products::Product;
use pricer_pricing::api::{price, price_basket};
use pricer_pricing::mc::PricingResult;
use serde::Serialize;
use tracing::info;

use super::OutputFormat;
use crate::config::RunConfig;
use crate::{CliError, Result};

/// Pricing output record.
#[derive(Debug, Serialize)]
struct PriceReport<'a> {
    contract: &'static str,
    n_paths: usize,
    mc: &'a std::collections::BTreeMap<String, String>,
    #[serde(flatten)]
    result: PricingResult,
    confidence_95: f64,
}

/// Run the price command
pub fn run(run_file: &str, format: OutputFormat) -> Result<()> {
    let path = Path::new(run_file);
    if !path.exists() {
        return Err(CliError::FileNotFound(run_file.to_string()));
    }
    let run = RunConfig::load(path)?;
    let result = price_run(&run)?;
    let contract = run.contract.build().map_err(pricer_pricing::McError::from)?;
    let report = PriceReport {
        contract: contract.type_name(),
        n_paths: run.n_paths,
        mc: &run.mc,
        result,
        confidence_95: result.confidence_95(),
    };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_table(&report),
    }
    Ok(())
}

/// Price a loaded run.
pub fn price_run(run: &RunConfig) -> Result<PricingResult> {
    let params = run.mc_params()?;
    let market = run.market_store()?;
    info!(
        curves = market.yield_curves.len(),
        vols = market.volatilities.len(),
        n_paths = run.n_paths,
        "starting pricing"
    );

    let result = match run.assets.as_slice() {
        [] => {
            return Err(CliError::InvalidArgument(
                "run file lists no assets".to_string(),
            ))
        }
        [asset] if run.correlation.is_none() => price(
            &market,
            &run.contract,
            &run.discount_curve,
            asset.dividend_yield,
            &asset.vol,
            asset.spot,
            &params,
            run.n_paths,
        )?,
        assets => {
            let dividend_yields: Vec<f64> = assets.iter().map(|a| a.dividend_yield).collect();
            let vols: Vec<&str> = assets.iter().map(|a| a.vol.as_str()).collect();
            let spots: Vec<f64> = assets.iter().map(|a| a.spot).collect();
            price_basket(
                &market,
                &run.contract,
                &run.discount_curve,
                &dividend_yields,
                &vols,
                &spots,
                &run.correlation_matrix()?,
                &params,
                run.n_paths,
            )?
        }
    };
    info!("Pricing complete");
    Ok(result)
}

fn print_table(report: &PriceReport<'_>) {
    println!("┌──────────────────┬──────────────────────┐");
    println!("│ {:<16} │ {:>20} │", "Contract", report.contract);
    println!("│ {:<16} │ {:>20} │", "Paths", report.n_paths);
    for (key, value) in report.mc {
        println!("│ {:<16} │ {:>20} │", key.to_ascii_uppercase(), value);
    }
    println!("├──────────────────┼──────────────────────┤");
    println!("│ {:<16} │ {:>20.8} │", "Mean", report.result.mean);
    println!("│ {:<16} │ {:>20.8} │", "Std error", report.result.std_err);
    println!("│ {:<16} │ {:>20.8} │", "95% CI ±", report.confidence_95);
    println!("└──────────────────┴──────────────────────┘");
}
