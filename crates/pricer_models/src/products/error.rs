//! Product error types.
//!
//! This module provides structured error handling for contract
//! construction and evaluation.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Contract construction and evaluation errors.
///
/// # Variants
/// - `InvalidSchedule`: Empty, negative, or non-increasing fixing/payment times
/// - `InvalidParameter`: Bad strike, payoff type, weights or asset count
/// - `UnsupportedOperation`: Evaluation mode not implemented by the contract
/// - `IndexOutOfRange`: Stepwise index outside the fixing schedule
/// - `PathShapeMismatch`: Path or spot vector of the wrong shape
///
/// # Examples
/// ```
/// use pricer_models::products::ProductError;
///
/// let err = ProductError::IndexOutOfRange { idx: 3, len: 3 };
/// assert_eq!(format!("{}", err), "Index out of range: 3 not in [0, 3)");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProductError {
    /// Invalid fixing or payment schedule.
    #[error("Invalid schedule: {message}")]
    InvalidSchedule {
        /// Description of the schedule problem
        message: String,
    },

    /// Invalid contract parameter.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },

    /// Evaluation mode not supported by this contract.
    #[error("{product} does not support {operation} evaluation")]
    UnsupportedOperation {
        /// Contract type name
        product: &'static str,
        /// Requested evaluation mode
        operation: &'static str,
    },

    /// Stepwise index outside the fixing schedule.
    #[error("Index out of range: {idx} not in [0, {len})")]
    IndexOutOfRange {
        /// Requested index
        idx: usize,
        /// Number of fixing times
        len: usize,
    },

    /// Input of the wrong shape.
    #[error("Path shape mismatch: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    PathShapeMismatch {
        /// Expected number of rows (fixing times)
        expected_rows: usize,
        /// Expected number of columns (assets)
        expected_cols: usize,
        /// Actual number of rows
        rows: usize,
        /// Actual number of columns
        cols: usize,
    },
}

impl ProductError {
    pub(crate) fn schedule(message: impl Into<String>) -> Self {
        ProductError::InvalidSchedule {
            message: message.into(),
        }
    }

    pub(crate) fn parameter(message: impl Into<String>) -> Self {
        ProductError::InvalidParameter {
            message: message.into(),
        }
    }
}

impl From<ProductError> for PricingError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::UnsupportedOperation { .. } => {
                PricingError::UnsupportedInstrument(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display() {
        let err = ProductError::UnsupportedOperation {
            product: "BermudanCallPut",
            operation: "whole-path",
        };
        assert_eq!(
            format!("{}", err),
            "BermudanCallPut does not support whole-path evaluation"
        );
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = ProductError::PathShapeMismatch {
            expected_rows: 2,
            expected_cols: 3,
            rows: 1,
            cols: 3,
        };
        assert_eq!(
            format!("{}", err),
            "Path shape mismatch: expected 2x3, got 1x3"
        );
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = ProductError::UnsupportedOperation {
            product: "X",
            operation: "stepwise",
        }
        .into();
        assert!(matches!(err, PricingError::UnsupportedInstrument(_)));

        let err: PricingError = ProductError::schedule("empty").into();
        match err {
            PricingError::InvalidInput(msg) => assert_eq!(msg, "Invalid schedule: empty"),
            _ => panic!("Expected InvalidInput variant"),
        }
    }
}
