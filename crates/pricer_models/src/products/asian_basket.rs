//! Arithmetic-average basket call/put.

use super::error::ProductError;
use super::payoff::PayoffType;
use super::schedule::{check_strike, Schedule};
use super::traits::Product;
use pricer_core::math::PathMatrix;

/// Call or put on the time average of a weighted basket.
///
/// At each fixing the basket level is `sum_j w_j S_j`; the payoff
/// `max(phi (avg - K), 0)` on the arithmetic average across fixings is paid
/// at the last fixing time. Whole-path only.
///
/// # Examples
/// ```
/// use pricer_core::math::Matrix;
/// use pricer_models::products::{AsianBasketCallPut, PayoffType, Product};
///
/// let mut p = AsianBasketCallPut::new(PayoffType::Call, 100.0, vec![0.5, 1.0], vec![0.5, 0.5])
///     .unwrap();
/// let path = Matrix::from_rows(&[vec![100.0, 100.0], vec![110.0, 130.0]]);
/// p.eval_path(&path).unwrap();
/// assert_eq!(p.pay_amounts(), &[10.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AsianBasketCallPut {
    payoff: PayoffType,
    strike: f64,
    weights: Vec<f64>,
    schedule: Schedule,
    amounts: Vec<f64>,
}

impl AsianBasketCallPut {
    /// Build the contract.
    ///
    /// # Errors
    /// - `InvalidParameter` for a negative strike, no weights, or a non-finite weight
    /// - `InvalidSchedule` for a bad fixing schedule
    pub fn new(
        payoff: PayoffType,
        strike: f64,
        fix_times: Vec<f64>,
        weights: Vec<f64>,
    ) -> Result<Self, ProductError> {
        check_strike(strike)?;
        if weights.is_empty() {
            return Err(ProductError::parameter("basket must contain at least one asset"));
        }
        if let Some(w) = weights.iter().find(|w| !w.is_finite()) {
            return Err(ProductError::parameter(format!(
                "basket weight must be finite, got {}",
                w
            )));
        }
        let pay_time = fix_times.last().copied().unwrap_or(f64::NAN);
        Ok(Self {
            payoff,
            strike,
            weights,
            schedule: Schedule::new(fix_times, vec![pay_time])?,
            amounts: vec![0.0],
        })
    }

    /// Basket weights, one per asset.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl Product for AsianBasketCallPut {
    fn type_name(&self) -> &'static str {
        "AsianBasketCallPut"
    }

    fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    fn pay_amounts(&self) -> &[f64] {
        &self.amounts
    }

    fn n_assets(&self) -> usize {
        self.weights.len()
    }

    fn supports_path_eval(&self) -> bool {
        true
    }

    fn eval_path(&mut self, path: &PathMatrix) -> Result<(), ProductError> {
        self.check_path(path)?;
        let n = path.n_rows();
        let total: f64 = (0..n)
            .map(|i| {
                path.row(i)
                    .iter()
                    .zip(&self.weights)
                    .map(|(s, w)| s * w)
                    .sum::<f64>()
            })
            .sum();
        self.amounts[0] = self.payoff.intrinsic(total / n as f64, self.strike);
        Ok(())
    }
}
