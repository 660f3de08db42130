//! Fixing and payment schedule shared by all contracts.

use super::error::ProductError;

/// Validated fixing and payment times, in years from the valuation date.
///
/// Invariants enforced at construction:
/// - at least one fixing time and one payment time
/// - fixing times finite, non-negative and strictly increasing
/// - payment times finite and non-negative
///
/// # Examples
/// ```
/// use pricer_models::products::Schedule;
///
/// assert!(Schedule::new(vec![1.0, 2.0], vec![2.0]).is_ok());
/// assert!(Schedule::new(vec![2.0, 1.0], vec![2.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    fix_times: Vec<f64>,
    pay_times: Vec<f64>,
}

impl Schedule {
    /// Validate and build a schedule.
    pub fn new(fix_times: Vec<f64>, pay_times: Vec<f64>) -> Result<Self, ProductError> {
        if fix_times.is_empty() {
            return Err(ProductError::schedule("at least one fixing time is required"));
        }
        if pay_times.is_empty() {
            return Err(ProductError::schedule("at least one payment time is required"));
        }
        for (i, &t) in fix_times.iter().enumerate() {
            if !t.is_finite() || t < 0.0 {
                return Err(ProductError::schedule(format!(
                    "fixing time {} at index {} must be finite and non-negative",
                    t, i
                )));
            }
            if i > 0 && t <= fix_times[i - 1] {
                return Err(ProductError::schedule(format!(
                    "fixing times must be strictly increasing: {} follows {}",
                    t,
                    fix_times[i - 1]
                )));
            }
        }
        if let Some(&t) = pay_times.iter().find(|t| !t.is_finite() || **t < 0.0) {
            return Err(ProductError::schedule(format!(
                "payment time {} must be finite and non-negative",
                t
            )));
        }
        Ok(Self {
            fix_times,
            pay_times,
        })
    }

    /// Fixing times.
    #[inline]
    pub fn fix_times(&self) -> &[f64] {
        &self.fix_times
    }

    /// Payment times.
    #[inline]
    pub fn pay_times(&self) -> &[f64] {
        &self.pay_times
    }

    /// Number of fixing times.
    #[inline]
    pub fn n_fixings(&self) -> usize {
        self.fix_times.len()
    }

    /// Number of payment times.
    #[inline]
    pub fn n_payments(&self) -> usize {
        self.pay_times.len()
    }
}

/// Reject non-finite or negative strikes.
pub(crate) fn check_strike(strike: f64) -> Result<(), ProductError> {
    if !strike.is_finite() || strike < 0.0 {
        return Err(ProductError::parameter(format!(
            "strike must be finite and non-negative, got {}",
            strike
        )));
    }
    Ok(())
}

/// Reject non-finite or non-positive times to expiry.
pub(crate) fn check_expiry(time_to_exp: f64) -> Result<(), ProductError> {
    if !time_to_exp.is_finite() || time_to_exp <= 0.0 {
        return Err(ProductError::schedule(format!(
            "time to expiry must be positive, got {}",
            time_to_exp
        )));
    }
    Ok(())
}
