//! Call/put payoff direction.

use super::error::ProductError;
use std::str::FromStr;

/// Direction of an option payoff.
///
/// # Examples
/// ```
/// use pricer_models::products::PayoffType;
///
/// assert_eq!(PayoffType::Call.phi(), 1.0);
/// assert_eq!(PayoffType::try_from(-1).unwrap(), PayoffType::Put);
/// assert_eq!(PayoffType::Put.intrinsic(90.0, 100.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum PayoffType {
    /// Pays when the underlying finishes above the strike
    Call,
    /// Pays when the underlying finishes below the strike
    Put,
}

impl PayoffType {
    /// +1 for calls, -1 for puts.
    #[inline]
    pub fn phi(self) -> f64 {
        match self {
            PayoffType::Call => 1.0,
            PayoffType::Put => -1.0,
        }
    }

    /// Vanilla intrinsic value `max(phi (s - k), 0)`.
    #[inline]
    pub fn intrinsic(self, s: f64, k: f64) -> f64 {
        (self.phi() * (s - k)).max(0.0)
    }

    /// Digital indicator. A call pays at `s >= k`, a put strictly below.
    #[inline]
    pub fn digital(self, s: f64, k: f64) -> f64 {
        let in_the_money = match self {
            PayoffType::Call => s >= k,
            PayoffType::Put => s < k,
        };
        if in_the_money {
            1.0
        } else {
            0.0
        }
    }
}

impl TryFrom<i32> for PayoffType {
    type Error = ProductError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PayoffType::Call),
            -1 => Ok(PayoffType::Put),
            other => Err(ProductError::parameter(format!(
                "payoff type must be 1 (call) or -1 (put), got {}",
                other
            ))),
        }
    }
}

impl FromStr for PayoffType {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CALL" | "1" => Ok(PayoffType::Call),
            "PUT" | "-1" => Ok(PayoffType::Put),
            other => Err(ProductError::parameter(format!(
                "unknown payoff type '{}'",
                other
            ))),
        }
    }
}
