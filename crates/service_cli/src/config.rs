//! Run file loading.
//!
//! A run file is TOML describing the market objects to register, the
//! contract, the underlying assets and the simulation settings:
//!
//! ```toml
//! discount_curve = "USD.OIS"
//! n_paths = 100000
//!
//! [mc]
//! URNGTYPE = "SOBOL"
//! PATHGENTYPE = "EULER"
//! CONTROLVARTYPE = "ANTITHETIC"
//!
//! [[curves]]
//! name = "USD.OIS"
//! kind = "interpolated"
//! input_type = "SPOTRATE"
//! maturities = [1.0, 5.0]
//! values = [0.03, 0.035]
//!
//! [[vols]]
//! name = "SPX"
//! kind = "flat"
//! value = 0.2
//!
//! [[assets]]
//! vol = "SPX"
//! spot = 100.0
//! dividend_yield = 0.01
//!
//! [contract]
//! type = "european"
//! payoff = "CALL"
//! strike = 100.0
//! time_to_exp = 1.0
//! ```
//!
//! Environment variables prefixed with `ORF_` override top-level scalars,
//! e.g. `ORF_N_PATHS=5000`.

use crate::error::{CliError, Result};
use ::config::{Config, Environment, File};
use pricer_core::market_data::{
    CurveEnum, CurveInputType, InterpolatedCurve, MarketStore, VolEnum, VolInputType,
    VolTermStructure,
};
use pricer_core::math::Matrix;
use pricer_models::products::ContractSpec;
use pricer_pricing::mc::McParams;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Shape of a yield curve or volatility entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TermStructureConfig {
    /// Constant rate or volatility.
    Flat {
        /// Level
        value: f64,
    },
    /// Pillar-based term structure.
    Interpolated {
        /// `SPOTRATE`, `FWDRATE` or `ZEROBOND` for curves; `SPOTVOL` or `FWDVOL` for vols
        input_type: String,
        /// Pillar times
        maturities: Vec<f64>,
        /// Pillar values
        values: Vec<f64>,
    },
}

/// Named market object in the run file.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketObjectConfig {
    /// Registry name
    pub name: String,
    /// Object definition
    #[serde(flatten)]
    pub shape: TermStructureConfig,
}

/// Underlying asset inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    /// Volatility name or tag
    pub vol: String,
    /// Current price
    pub spot: f64,
    /// Continuous dividend yield
    #[serde(default)]
    pub dividend_yield: f64,
}

/// Complete pricing run.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Discount curve name or tag
    pub discount_curve: String,
    /// Number of trials
    pub n_paths: usize,
    /// Simulation settings in the `KEY = VALUE` wire format
    pub mc: BTreeMap<String, String>,
    /// Curves to register
    #[serde(default)]
    pub curves: Vec<MarketObjectConfig>,
    /// Volatilities to register
    #[serde(default)]
    pub vols: Vec<MarketObjectConfig>,
    /// Underlying assets in contract order
    pub assets: Vec<AssetConfig>,
    /// Asset correlation rows, required for more than one asset
    #[serde(default)]
    pub correlation: Option<Vec<Vec<f64>>>,
    /// Contract description
    pub contract: ContractSpec,
}

impl RunConfig {
    /// Load a run file with `ORF_` environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("ORF").try_parsing(true))
            .build()?;
        let run: RunConfig = settings.try_deserialize()?;
        debug!(path = %path.display(), contract = ?run.contract, "loaded run file");
        Ok(run)
    }

    /// Parse run-file TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(text, ::config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Simulation settings.
    ///
    /// Keys are upper-cased first since the loader normalises them to lower case.
    pub fn mc_params(&self) -> Result<McParams> {
        let map: BTreeMap<String, String> = self
            .mc
            .iter()
            .map(|(k, v)| (k.to_ascii_uppercase(), v.clone()))
            .collect();
        Ok(McParams::try_from(map)?)
    }

    /// Store holding every curve and volatility of the run file.
    pub fn market_store(&self) -> Result<MarketStore> {
        let mut market = MarketStore::new();
        for curve in &self.curves {
            let object = match &curve.shape {
                TermStructureConfig::Flat { value } => CurveEnum::flat(*value),
                TermStructureConfig::Interpolated {
                    input_type,
                    maturities,
                    values,
                } => {
                    let input_type: CurveInputType = input_type.parse()?;
                    InterpolatedCurve::new(maturities, values, input_type)?.into()
                }
            };
            market.yield_curves.set(&curve.name, object)?;
        }
        for vol in &self.vols {
            let object = match &vol.shape {
                TermStructureConfig::Flat { value } => VolEnum::flat(*value),
                TermStructureConfig::Interpolated {
                    input_type,
                    maturities,
                    values,
                } => {
                    let input_type: VolInputType = input_type.parse()?;
                    VolTermStructure::new(maturities, values, input_type)?.into()
                }
            };
            market.volatilities.set(&vol.name, object)?;
        }
        Ok(market)
    }

    /// Correlation matrix, identity when absent.
    pub fn correlation_matrix(&self) -> Result<Matrix> {
        match &self.correlation {
            Some(rows) => {
                if rows.iter().any(|r| r.len() != rows.len()) {
                    return Err(CliError::InvalidArgument(
                        "correlation must be a square matrix".to_string(),
                    ));
                }
                Ok(Matrix::from_rows(rows))
            }
            None => {
                let n = self.assets.len();
                let mut m = Matrix::new(n, n);
                for i in 0..n {
                    m[(i, i)] = 1.0;
                }
                Ok(m)
            }
        }
    }
}
