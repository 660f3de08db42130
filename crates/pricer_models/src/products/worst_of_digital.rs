//! Worst-of basket digital call/put.

use super::error::ProductError;
use super::payoff::PayoffType;
use super::schedule::{check_strike, Schedule};
use super::traits::Product;
use pricer_core::math::PathMatrix;

/// Digital on the worst performer of a basket.
///
/// Fixings at `[fixing_time, expiry_time]`, one payment at expiry. The worst
/// performance is `min_j S_j(expiry) / S_j(fixing)`; a call pays 1 when it is
/// at or above the strike, a put when strictly below. Whole-path only.
///
/// # Examples
/// ```
/// use pricer_core::math::Matrix;
/// use pricer_models::products::{PayoffType, Product, WorstOfDigitalCallPut};
///
/// let mut p = WorstOfDigitalCallPut::new(PayoffType::Call, 0.9, 0.0, 1.0, 2).unwrap();
/// let path = Matrix::from_rows(&[vec![100.0, 50.0], vec![95.0, 46.0]]);
/// p.eval_path(&path).unwrap();
/// // Worst performance is 0.92
/// assert_eq!(p.pay_amounts(), &[1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WorstOfDigitalCallPut {
    payoff: PayoffType,
    strike: f64,
    n_assets: usize,
    schedule: Schedule,
    amounts: Vec<f64>,
}

impl WorstOfDigitalCallPut {
    /// Build the contract.
    ///
    /// # Errors
    /// - `InvalidParameter` for a negative strike or zero assets
    /// - `InvalidSchedule` unless `0 <= fixing_time < expiry_time`
    pub fn new(
        payoff: PayoffType,
        strike: f64,
        fixing_time: f64,
        expiry_time: f64,
        n_assets: usize,
    ) -> Result<Self, ProductError> {
        check_strike(strike)?;
        if n_assets == 0 {
            return Err(ProductError::parameter("basket must contain at least one asset"));
        }
        Ok(Self {
            payoff,
            strike,
            n_assets,
            schedule: Schedule::new(vec![fixing_time, expiry_time], vec![expiry_time])?,
            amounts: vec![0.0],
        })
    }

    /// Payoff direction.
    pub fn payoff(&self) -> PayoffType {
        self.payoff
    }

    /// Strike, as a performance ratio.
    pub fn strike(&self) -> f64 {
        self.strike
    }
}

impl Product for WorstOfDigitalCallPut {
    fn type_name(&self) -> &'static str {
        "WorstOfDigitalCallPut"
    }

    fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    fn pay_amounts(&self) -> &[f64] {
        &self.amounts
    }

    fn n_assets(&self) -> usize {
        self.n_assets
    }

    fn supports_path_eval(&self) -> bool {
        true
    }

    fn eval_path(&mut self, path: &PathMatrix) -> Result<(), ProductError> {
        self.check_path(path)?;
        let worst = path
            .row(1)
            .iter()
            .zip(path.row(0))
            .map(|(end, start)| end / start)
            .fold(f64::INFINITY, f64::min);
        self.amounts[0] = self.payoff.digital(worst, self.strike);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::math::Matrix;

    #[test]
    fn test_validation() {
        assert!(WorstOfDigitalCallPut::new(PayoffType::Call, -0.1, 0.0, 1.0, 2).is_err());
        assert!(WorstOfDigitalCallPut::new(PayoffType::Call, 1.0, 0.0, 1.0, 0).is_err());
        assert!(matches!(
            WorstOfDigitalCallPut::new(PayoffType::Call, 1.0, 1.0, 1.0, 2),
            Err(ProductError::InvalidSchedule { .. })
        ));
    }

    #[test]
    fn test_schedule_and_assets() {
        let p = WorstOfDigitalCallPut::new(PayoffType::Put, 1.0, 0.5, 2.0, 3).unwrap();
        assert_eq!(p.fix_times(), &[0.5, 2.0]);
        assert_eq!(p.pay_times(), &[2.0]);
        assert_eq!(p.n_assets(), 3);
    }

    #[test]
    fn test_worst_performer_drives_payoff() {
        let mut call = WorstOfDigitalCallPut::new(PayoffType::Call, 1.0, 0.0, 1.0, 3).unwrap();
        let mut put = WorstOfDigitalCallPut::new(PayoffType::Put, 1.0, 0.0, 1.0, 3).unwrap();
        let path = Matrix::from_rows(&[vec![10.0, 20.0, 30.0], vec![12.0, 19.0, 33.0]]);
        call.eval_path(&path).unwrap();
        put.eval_path(&path).unwrap();
        assert_eq!(call.pay_amounts(), &[0.0]);
        assert_eq!(put.pay_amounts(), &[1.0]);
    }

    #[test]
    fn test_boundary_pays_call() {
        let mut call = WorstOfDigitalCallPut::new(PayoffType::Call, 1.0, 0.0, 1.0, 2).unwrap();
        let path = Matrix::from_rows(&[vec![10.0, 20.0], vec![10.0, 20.0]]);
        call.eval_path(&path).unwrap();
        assert_eq!(call.pay_amounts(), &[1.0]);
    }

    #[test]
    fn test_stepwise_unsupported() {
        let mut p = WorstOfDigitalCallPut::new(PayoffType::Call, 1.0, 0.0, 1.0, 2).unwrap();
        assert!(!p.supports_step_eval());
        assert!(matches!(
            p.eval_step(1, &[1.0, 1.0], 0.0),
            Err(ProductError::UnsupportedOperation { .. })
        ));
    }
}
