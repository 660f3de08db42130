//! ORF CLI - Command Line Operations for Monte Carlo Pricing
//!
//! This is the operational entry point for the Monte Carlo pricing engine.
//!
//! # Commands
//!
//! - `orf price --run <file>` - Price the contract described by a run file
//! - `orf sobol --points <n> --dims <d>` - Print Sobol sequence points
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate only loads inputs, registers market
//! objects and calls the `pricer_pricing` call surface.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::OutputFormat;
pub use error::{CliError, Result};

/// Monte Carlo pricing CLI
#[derive(Parser)]
#[command(name = "orf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price the contract described by a run file
    Price {
        /// Path to the TOML run file
        #[arg(short, long)]
        run: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Print points of the Sobol sequence
    Sobol {
        /// Number of points
        #[arg(short, long, default_value = "16")]
        points: usize,

        /// Number of dimensions
        #[arg(short, long, default_value = "1")]
        dims: usize,

        /// Map the points to standard normals
        #[arg(short, long)]
        normal: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Price { run, format } => commands::price::run(&run, format),
        Commands::Sobol {
            points,
            dims,
            normal,
            format,
        } => commands::sobol::run(points, dims, normal, format),
    }
}
