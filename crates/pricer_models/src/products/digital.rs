//! European digital call/put.

use super::error::ProductError;
use super::payoff::PayoffType;
use super::schedule::{check_expiry, Schedule};
use super::traits::{apply_exercise_rule, Product};
use pricer_core::math::PathMatrix;

/// Cash-or-nothing digital on a single asset paying 1 at expiry.
///
/// A call pays when the terminal level is at or above the strike, a put
/// when it is strictly below.
///
/// # Examples
/// ```
/// use pricer_core::math::Matrix;
/// use pricer_models::products::{DigitalCallPut, PayoffType, Product};
///
/// let mut call = DigitalCallPut::new(PayoffType::Call, 100.0, 1.0).unwrap();
/// call.eval_path(&Matrix::filled(1, 1, 100.0)).unwrap();
/// assert_eq!(call.pay_amounts(), &[1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DigitalCallPut {
    payoff: PayoffType,
    strike: f64,
    schedule: Schedule,
    amounts: Vec<f64>,
}

impl DigitalCallPut {
    /// Build the contract.
    ///
    /// # Errors
    /// - `InvalidParameter` for a non-positive strike
    /// - `InvalidSchedule` for a non-positive time to expiry
    pub fn new(payoff: PayoffType, strike: f64, time_to_exp: f64) -> Result<Self, ProductError> {
        if !strike.is_finite() || strike <= 0.0 {
            return Err(ProductError::parameter(format!(
                "digital strike must be positive, got {}",
                strike
            )));
        }
        check_expiry(time_to_exp)?;
        Ok(Self {
            payoff,
            strike,
            schedule: Schedule::new(vec![time_to_exp], vec![time_to_exp])?,
            amounts: vec![0.0],
        })
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

impl Product for DigitalCallPut {
    fn type_name(&self) -> &'static str {
        "DigitalCallPut"
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

    fn supports_path_eval(&self) -> bool {
        true
    }

    fn supports_step_eval(&self) -> bool {
        true
    }

    fn eval_path(&mut self, path: &PathMatrix) -> Result<(), ProductError> {
        self.check_path(path)?;
        self.amounts[0] = self.payoff.digital(path[(0, 0)], self.strike);
        Ok(())
    }

    fn intrinsic(&self, idx: usize, spots: &[f64]) -> Result<f64, ProductError> {
        self.check_step(idx, spots)?;
        Ok(self.payoff.digital(spots[0], self.strike))
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

    #[test]
    fn test_strike_must_be_positive() {
        assert!(DigitalCallPut::new(PayoffType::Call, 0.0, 1.0).is_err());
        assert!(DigitalCallPut::new(PayoffType::Call, 100.0, -1.0).is_err());
    }

    #[test]
    fn test_at_the_money_boundary_is_stable() {
        let mut call = DigitalCallPut::new(PayoffType::Call, 100.0, 1.0).unwrap();
        let mut put = DigitalCallPut::new(PayoffType::Put, 100.0, 1.0).unwrap();
        let atm = Matrix::filled(1, 1, 100.0);
        for _ in 0..5 {
            call.eval_path(&atm).unwrap();
            put.eval_path(&atm).unwrap();
            assert_eq!(call.pay_amounts(), &[1.0]);
            assert_eq!(put.pay_amounts(), &[0.0]);
        }
    }

    #[test]
    fn test_eval_step_matches_path() {
        let mut put = DigitalCallPut::new(PayoffType::Put, 100.0, 1.0).unwrap();
        assert_eq!(put.eval_step(0, &[99.0], 0.3).unwrap(), 1.0);
        assert_eq!(put.pay_amounts(), &[1.0]);
        assert!(put.eval_step(1, &[99.0], 0.0).is_err());
    }
}
