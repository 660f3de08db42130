//! European call/put.

use super::error::ProductError;
use super::payoff::PayoffType;
use super::schedule::{check_expiry, check_strike, Schedule};
use super::traits::{apply_exercise_rule, Product};
use pricer_core::math::PathMatrix;

/// European call or put on a single asset, fixed and paid at expiry.
///
/// Supports both evaluation modes; stepwise evaluation has a single,
/// terminal index.
///
/// # Examples
/// ```
/// use pricer_core::math::Matrix;
/// use pricer_models::products::{EuropeanCallPut, PayoffType, Product};
///
/// let mut call = EuropeanCallPut::new(PayoffType::Call, 100.0, 1.0).unwrap();
/// call.eval_path(&Matrix::filled(1, 1, 112.0)).unwrap();
/// assert_eq!(call.pay_amounts(), &[12.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EuropeanCallPut {
    payoff: PayoffType,
    strike: f64,
    schedule: Schedule,
    amounts: Vec<f64>,
}

impl EuropeanCallPut {
    /// Build the contract.
    ///
    /// # Errors
    /// - `InvalidParameter` for a negative strike
    /// - `InvalidSchedule` for a non-positive time to expiry
    pub fn new(payoff: PayoffType, strike: f64, time_to_exp: f64) -> Result<Self, ProductError> {
        check_strike(strike)?;
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

impl Product for EuropeanCallPut {
    fn type_name(&self) -> &'static str {
        "EuropeanCallPut"
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
        self.amounts[0] = self.payoff.intrinsic(path[(0, 0)], self.strike);
        Ok(())
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
