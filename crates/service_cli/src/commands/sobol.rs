//! Sobol command implementation
//!
//! Prints the first points of the Sobol sequence.

use pricer_pricing::api::sobol_sequence;
use tracing::info;

use super::OutputFormat;
use crate::{CliError, Result};

/// Run the sobol command
pub fn run(n_points: usize, n_dims: usize, normal: bool, format: OutputFormat) -> Result<()> {
    if n_points == 0 {
        return Err(CliError::InvalidArgument(
            "at least one point is required".to_string(),
        ));
    }
    info!(n_points, n_dims, normal, "generating Sobol points");
    let points = sobol_sequence(n_points, n_dims, normal)?;

    match format {
        OutputFormat::Json => {
            let rows: Vec<&[f64]> = (0..points.n_rows()).map(|i| points.row(i)).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Table => {
            for i in 0..points.n_rows() {
                let line: Vec<String> = points.row(i).iter().map(|x| format!("{:>12.8}", x)).collect();
                println!("{}", line.join(" "));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_requests() {
        assert!(matches!(
            run(0, 2, false, OutputFormat::Table),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            run(4, 30_000, false, OutputFormat::Table),
            Err(CliError::Simulation(_))
        ));
    }
}
