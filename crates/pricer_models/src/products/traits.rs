//! Contract evaluation protocol.
//!
//! Every contract exposes its fixing and payment schedules plus a payment
//! amount slot with one entry per payment time. Evaluation overwrites that
//! slot; callers read it before the next call.
//!
//! Two evaluation modes exist:
//!
//! - **Whole-path** ([`Product::eval_path`]): given one simulated trial
//!   (rows = fixing times, columns = assets) compute every payment amount.
//! - **Stepwise** ([`Product::eval_step`]): called once per fixing index in
//!   decreasing order by a backward-induction driver (regression Monte Carlo
//!   or a grid solver), with the asset levels at that fixing and the
//!   continuation value supplied by the driver.
//!
//! # Stepwise Semantics
//!
//! - The last index is terminal: the payment amount is the intrinsic value
//!   floored at zero and the continuation argument is ignored. This call also
//!   clears every other payment amount, starting a new backward sweep.
//! - At an earlier index the contract exercises when its intrinsic value is
//!   strictly greater than the continuation value. On exercise the payment at
//!   that index is the intrinsic value and every later payment is zeroed; when
//!   holding, the payment at that index is zero.
//! - The return value is the node value `max(intrinsic, continuation)` that a
//!   grid solver rolls back; regression drivers read the payment amounts.
//!
//! Contracts are `Clone` so that concurrent workers can each own one.

use super::error::ProductError;
use super::schedule::Schedule;
use pricer_core::math::PathMatrix;

/// Shared capability of all contracts.
pub trait Product {
    /// Contract type name for logging and error messages.
    fn type_name(&self) -> &'static str;

    /// Fixing and payment schedule.
    fn schedule(&self) -> &Schedule;

    /// Payment amounts produced by the most recent evaluation.
    fn pay_amounts(&self) -> &[f64];

    /// Number of underlying assets (path columns) consumed.
    fn n_assets(&self) -> usize;

    /// Fixing times.
    #[inline]
    fn fix_times(&self) -> &[f64] {
        self.schedule().fix_times()
    }

    /// Payment times, one per payment amount.
    #[inline]
    fn pay_times(&self) -> &[f64] {
        self.schedule().pay_times()
    }

    /// Whether [`Product::eval_path`] is implemented.
    fn supports_path_eval(&self) -> bool {
        false
    }

    /// Whether [`Product::eval_step`] is implemented.
    fn supports_step_eval(&self) -> bool {
        false
    }

    /// Evaluate all payment amounts on one simulated trial.
    fn eval_path(&mut self, path: &PathMatrix) -> Result<(), ProductError> {
        let _ = path;
        Err(ProductError::UnsupportedOperation {
            product: self.type_name(),
            operation: "whole-path",
        })
    }

    /// Intrinsic (immediate exercise) value at fixing `idx`.
    fn intrinsic(&self, idx: usize, spots: &[f64]) -> Result<f64, ProductError> {
        let _ = (idx, spots);
        Err(ProductError::UnsupportedOperation {
            product: self.type_name(),
            operation: "stepwise",
        })
    }

    /// Backward-induction step at fixing `idx`; see the module docs.
    fn eval_step(
        &mut self,
        idx: usize,
        spots: &[f64],
        cont_value: f64,
    ) -> Result<f64, ProductError> {
        let _ = (idx, spots, cont_value);
        Err(ProductError::UnsupportedOperation {
            product: self.type_name(),
            operation: "stepwise",
        })
    }

    /// Check that `path` has one row per fixing and one column per asset.
    fn check_path(&self, path: &PathMatrix) -> Result<(), ProductError> {
        let expected_rows = self.fix_times().len();
        let expected_cols = self.n_assets();
        if path.n_rows() != expected_rows || path.n_cols() != expected_cols {
            return Err(ProductError::PathShapeMismatch {
                expected_rows,
                expected_cols,
                rows: path.n_rows(),
                cols: path.n_cols(),
            });
        }
        Ok(())
    }

    /// Check a stepwise index and spot vector.
    fn check_step(&self, idx: usize, spots: &[f64]) -> Result<(), ProductError> {
        let len = self.fix_times().len();
        if idx >= len {
            return Err(ProductError::IndexOutOfRange { idx, len });
        }
        if spots.len() != self.n_assets() {
            return Err(ProductError::PathShapeMismatch {
                expected_rows: 1,
                expected_cols: self.n_assets(),
                rows: 1,
                cols: spots.len(),
            });
        }
        Ok(())
    }
}

/// Apply the stepwise exercise rule to `amounts` and return the node value.
///
/// `amounts` has one slot per fixing index, paid at the matching time.
pub(crate) fn apply_exercise_rule(
    amounts: &mut [f64],
    idx: usize,
    intrinsic: f64,
    cont_value: f64,
) -> f64 {
    let last = amounts.len() - 1;
    if idx == last {
        amounts.fill(0.0);
        amounts[idx] = intrinsic;
        return intrinsic;
    }
    if intrinsic > cont_value {
        amounts[idx] = intrinsic;
        amounts[idx + 1..].fill(0.0);
        intrinsic
    } else {
        amounts[idx] = 0.0;
        cont_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_rule_terminal_ignores_continuation() {
        let mut amounts = vec![7.0, 7.0, 7.0];
        let v = apply_exercise_rule(&mut amounts, 2, 2.0, 100.0);
        assert_eq!(v, 2.0);
        assert_eq!(amounts, vec![0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_exercise_rule_zeroes_later_payments() {
        let mut amounts = vec![0.0, 0.0, 2.0];
        let v = apply_exercise_rule(&mut amounts, 1, 5.0, 1.0);
        assert_eq!(v, 5.0);
        assert_eq!(amounts, vec![0.0, 5.0, 0.0]);
    }

    #[test]
    fn test_exercise_rule_tie_holds() {
        let mut amounts = vec![0.0, 3.0];
        let v = apply_exercise_rule(&mut amounts, 0, 3.0, 3.0);
        assert_eq!(v, 3.0);
        assert_eq!(amounts, vec![0.0, 3.0]);
    }
}
