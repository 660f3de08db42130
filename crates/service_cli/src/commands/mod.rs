//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod price;
pub mod sobol;

/// Output format shared by the commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Plain text table
    Table,
}
