//! Bermudan and American call/put.

use super::error::ProductError;
use super::payoff::PayoffType;
use super::schedule::{check_expiry, check_strike, Schedule};
use super::traits::{apply_exercise_rule, Product};

/// Early-exercise call or put on a single asset.
///
/// Each exercise time is both a fixing and a payment time. The contract is
/// evaluated stepwise only, by a backward-induction driver that supplies the
/// continuation value at each index.
///
/// # Examples
/// ```
/// use pricer_models::products::{BermudanCallPut, PayoffType, Product};
///
/// let mut p = BermudanCallPut::new(PayoffType::Call, 100.0, vec![1.0, 2.0, 3.0]).unwrap();
/// p.eval_step(2, &[102.0], 0.0).unwrap();
/// p.eval_step(1, &[105.0], 1.0).unwrap();
/// p.eval_step(0, &[100.0], 4.0).unwrap();
/// assert_eq!(p.pay_amounts(), &[0.0, 5.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BermudanCallPut {
    payoff: PayoffType,
    strike: f64,
    schedule: Schedule,
    amounts: Vec<f64>,
}

impl BermudanCallPut {
    /// Build a Bermudan with the given exercise times.
    ///
    /// # Errors
    /// - `InvalidParameter` for a negative strike
    /// - `InvalidSchedule` for empty, negative or non-increasing exercise times
    pub fn new(
        payoff: PayoffType,
        strike: f64,
        exercise_times: Vec<f64>,
    ) -> Result<Self, ProductError> {
        check_strike(strike)?;
        let n = exercise_times.len();
        Ok(Self {
            payoff,
            strike,
            schedule: Schedule::new(exercise_times.clone(), exercise_times)?,
            amounts: vec![0.0; n],
        })
    }

    /// Approximate an American option by `n_exercise` equally spaced
    /// exercise times ending at expiry.
    ///
    /// # Errors
    /// - `InvalidParameter` for a negative strike or zero exercise times
    /// - `InvalidSchedule` for a non-positive time to expiry
    pub fn american(
        payoff: PayoffType,
        strike: f64,
        time_to_exp: f64,
        n_exercise: usize,
    ) -> Result<Self, ProductError> {
        check_expiry(time_to_exp)?;
        if n_exercise == 0 {
            return Err(ProductError::parameter(
                "American exercise grid needs at least one time",
            ));
        }
        let dt = time_to_exp / n_exercise as f64;
        let times = (1..=n_exercise).map(|i| i as f64 * dt).collect();
        Self::new(payoff, strike, times)
    }

    /// Payoff direction.
    pub fn payoff(&self) -> PayoffType {
        self.payoff
    }

    /// Strike.
    pub fn strike(&self) -> f64 {
        self.strike
    }
}

impl Product for BermudanCallPut {
    fn type_name(&self) -> &'static str {
        "BermudanCallPut"
    }

    fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    fn pay_amounts(&self) -> &[f64] {
        &self.amounts
    }

    fn n_assets(&self) -> usize {
        1
    }

    fn supports_step_eval(&self) -> bool {
        true
    }

    fn intrinsic(&self, idx: usize, spots: &[f64]) -> Result<f64, ProductError> {
        self.check_step(idx, spots)?;
        Ok(self.payoff.intrinsic(spots[0], self.strike))
    }

    fn eval_step(
        &mut self,
        idx: usize,
        spots: &[f64],
        cont_value: f64,
    ) -> Result<f64, ProductError> {
        let intrinsic = self.intrinsic(idx, spots)?;
        Ok(apply_exercise_rule(&mut self.amounts, idx, intrinsic, cont_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::math::Matrix;

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_schedule_validation() {
        assert!(matches!(
            BermudanCallPut::new(PayoffType::Put, 100.0, vec![]),
            Err(ProductError::InvalidSchedule { .. })
        ));
        assert!(matches!(
            BermudanCallPut::new(PayoffType::Put, 100.0, vec![1.0, 0.5]),
            Err(ProductError::InvalidSchedule { .. })
        ));
        assert!(matches!(
            BermudanCallPut::new(PayoffType::Put, 100.0, vec![-1.0, 0.5]),
            Err(ProductError::InvalidSchedule { .. })
        ));
    }

    #[test]
    fn test_american_grid() {
        let p = BermudanCallPut::american(PayoffType::Put, 100.0, 1.0, 4).unwrap();
        assert_eq!(p.fix_times(), &[0.25, 0.5, 0.75, 1.0]);
        assert_eq!(p.pay_times(), p.fix_times());
        assert_eq!(p.pay_amounts().len(), 4);
        assert!(BermudanCallPut::american(PayoffType::Put, 100.0, 1.0, 0).is_err());
    }

    // ========================================
    // Stepwise Evaluation Tests
    // ========================================

    #[test]
    fn test_backward_sweep_exercise_zeroes_later() {
        // Intrinsic [0, 5, 2], continuation [4, 1, -]
        let mut call = BermudanCallPut::new(PayoffType::Call, 100.0, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(call.eval_step(2, &[102.0], 123.0).unwrap(), 2.0);
        assert_eq!(call.pay_amounts(), &[0.0, 0.0, 2.0]);
        assert_eq!(call.eval_step(1, &[105.0], 1.0).unwrap(), 5.0);
        assert_eq!(call.pay_amounts(), &[0.0, 5.0, 0.0]);
        assert_eq!(call.eval_step(0, &[95.0], 4.0).unwrap(), 4.0);
        assert_eq!(call.pay_amounts(), &[0.0, 5.0, 0.0]);
    }

    #[test]
    fn test_terminal_step_resets_previous_sweep() {
        let mut put = BermudanCallPut::new(PayoffType::Put, 100.0, vec![1.0, 2.0]).unwrap();
        put.eval_step(1, &[90.0], 0.0).unwrap();
        put.eval_step(0, &[80.0], 5.0).unwrap();
        assert_eq!(put.pay_amounts(), &[20.0, 0.0]);

        put.eval_step(1, &[95.0], 0.0).unwrap();
        assert_eq!(put.pay_amounts(), &[0.0, 5.0]);
    }

    #[test]
    fn test_out_of_range_and_shape() {
        let mut put = BermudanCallPut::new(PayoffType::Put, 100.0, vec![1.0, 2.0]).unwrap();
        assert!(matches!(
            put.eval_step(2, &[90.0], 0.0),
            Err(ProductError::IndexOutOfRange { idx: 2, len: 2 })
        ));
        assert!(matches!(
            put.eval_step(0, &[90.0, 91.0], 0.0),
            Err(ProductError::PathShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_whole_path_unsupported() {
        let mut put = BermudanCallPut::new(PayoffType::Put, 100.0, vec![1.0, 2.0]).unwrap();
        assert!(!put.supports_path_eval());
        assert!(matches!(
            put.eval_path(&Matrix::new(2, 1)),
            Err(ProductError::UnsupportedOperation { .. })
        ));
    }
}
