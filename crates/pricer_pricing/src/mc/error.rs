//! Error types for the Monte Carlo engine.
//!
//! [`ConfigError`] covers run configuration that is rejected before any
//! trial is simulated; [`McError`] is the error of a pricing run and wraps
//! configuration, contract and market-data failures.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::PricingError;
use pricer_models::products::ProductError;
use thiserror::Error;

/// Configuration error for the Monte Carlo pricer.
///
/// These errors occur at parse or construction time, before simulation.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required key is absent from the configuration mapping.
    #[error("Missing required key '{0}'")]
    MissingKey(&'static str),

    /// A key holds a value outside its enumeration.
    #[error("Invalid value '{value}' for key '{key}'")]
    InvalidValue {
        /// Configuration key
        key: String,
        /// Rejected value
        value: String,
    },

    /// The configuration mapping holds an unrecognised key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// A low-discrepancy source was requested with unsupported dimensionality.
    #[error("Sobol dimension {requested} outside the supported range [1, {max}]")]
    TooManyDimensions {
        /// Number of dimensions one trial needs
        requested: usize,
        /// Supported maximum
        max: usize,
    },

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Error of a Monte Carlo pricing run.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum McError {
    /// Rejected run configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Contract construction or evaluation failure.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// Unresolved or invalid market data.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// Invalid pricing-call argument.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl From<McError> for PricingError {
    fn from(err: McError) -> Self {
        match err {
            McError::Config(e) => PricingError::Configuration(e.to_string()),
            McError::Product(e) => e.into(),
            McError::MarketData(e) => e.into(),
            McError::InvalidParameter { .. } => PricingError::InvalidInput(err.to_string()),
        }
    }
}
