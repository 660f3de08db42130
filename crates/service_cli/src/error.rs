//! CLI error types.

use pricer_core::market_data::MarketDataError;
use pricer_pricing::mc::McError;
use thiserror::Error;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Bad command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Run file could not be loaded or deserialised.
    #[error("Run file error: {0}")]
    RunFile(#[from] ::config::ConfigError),

    /// Market object in the run file rejected.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// Pricing failed.
    #[error(transparent)]
    Pricing(#[from] McError),

    /// Simulation settings rejected.
    #[error(transparent)]
    Simulation(#[from] pricer_pricing::mc::ConfigError),

    /// Output rendering failed.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
