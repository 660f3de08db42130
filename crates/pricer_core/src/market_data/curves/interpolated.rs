//! Interpolated yield curve implementation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::market_data::{check_maturity, to_f64};
use num_traits::Float;
use std::str::FromStr;

/// How the pillar values of an [`InterpolatedCurve`] are quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum CurveInputType {
    /// Continuously compounded zero rates to each pillar.
    SpotRate,
    /// Forward rates, flat over each interval ending at the pillar.
    FwdRate,
    /// Zero-coupon bond prices (discount factors).
    ZeroBond,
}

impl FromStr for CurveInputType {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SPOTRATE" => Ok(Self::SpotRate),
            "FWDRATE" => Ok(Self::FwdRate),
            "ZEROBOND" => Ok(Self::ZeroBond),
            other => Err(MarketDataError::InvalidInput(format!(
                "unknown curve input type '{}'",
                other
            ))),
        }
    }
}

/// Yield curve with piecewise-flat instantaneous forward rates.
///
/// The curve stores the pillar times, the cumulative integral of the forward
/// rate up to each pillar, and the flat forward rate on each interval
/// `(t_{i-1}, t_i]` (with `t_0 = 0`). Beyond the last pillar the last forward
/// rate is extrapolated flat.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CurveInputType, InterpolatedCurve, YieldCurve};
///
/// let curve: InterpolatedCurve<f64> = InterpolatedCurve::new(
///     &[1.0, 2.0],
///     &[0.02, 0.03],
///     CurveInputType::SpotRate,
/// ).unwrap();
///
/// assert!((curve.spot_rate(2.0).unwrap() - 0.03).abs() < 1e-12);
/// // Forward over (1, 2] is 2 * 0.03 - 1 * 0.02
/// assert!((curve.fwd_rate(1.0, 2.0).unwrap() - 0.04).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedCurve<T: Float> {
    times: Vec<T>,
    integrals: Vec<T>,
    forwards: Vec<T>,
}

impl<T: Float> InterpolatedCurve<T> {
    /// Construct a curve from pillar times and quotes.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` - No pillars or mismatched lengths
    /// * `InvalidMaturity` - Times not strictly increasing and positive
    /// * `InvalidInput` - Non-positive zero-bond price or non-finite quote
    pub fn new(
        times: &[T],
        values: &[T],
        input_type: CurveInputType,
    ) -> Result<Self, MarketDataError> {
        if times.is_empty() {
            return Err(MarketDataError::InsufficientData { got: 0, need: 1 });
        }
        if times.len() != values.len() {
            return Err(MarketDataError::InsufficientData {
                got: values.len(),
                need: times.len(),
            });
        }

        let mut prev = T::zero();
        for &t in times {
            if t <= prev || !t.is_finite() {
                return Err(MarketDataError::InvalidMaturity { t: to_f64(t) });
            }
            prev = t;
        }
        if let Some(v) = values.iter().find(|v| !v.is_finite()) {
            return Err(MarketDataError::InvalidInput(format!(
                "non-finite curve quote {}",
                to_f64(*v)
            )));
        }

        let integrals: Vec<T> = match input_type {
            CurveInputType::SpotRate => times.iter().zip(values).map(|(&t, &r)| r * t).collect(),
            CurveInputType::ZeroBond => {
                if let Some(p) = values.iter().find(|&&p| p <= T::zero()) {
                    return Err(MarketDataError::InvalidInput(format!(
                        "zero-bond price must be positive, got {}",
                        to_f64(*p)
                    )));
                }
                values.iter().map(|p| -p.ln()).collect()
            }
            CurveInputType::FwdRate => {
                let mut acc = T::zero();
                let mut start = T::zero();
                times
                    .iter()
                    .zip(values)
                    .map(|(&t, &f)| {
                        acc = acc + f * (t - start);
                        start = t;
                        acc
                    })
                    .collect()
            }
        };

        let mut forwards = Vec::with_capacity(times.len());
        let mut start = T::zero();
        let mut base = T::zero();
        for (&t, &integral) in times.iter().zip(&integrals) {
            forwards.push((integral - base) / (t - start));
            start = t;
            base = integral;
        }

        Ok(Self {
            times: times.to_vec(),
            integrals,
            forwards,
        })
    }

    /// Pillar times.
    #[inline]
    pub fn times(&self) -> &[T] {
        &self.times
    }

    /// Flat forward rate on each interval ending at the matching pillar.
    #[inline]
    pub fn forwards(&self) -> &[T] {
        &self.forwards
    }

    /// Locate the interval containing `t` as (start time, integral at start, forward).
    fn segment(&self, t: T) -> (T, T, T) {
        let n = self.times.len();
        let k = self.times.partition_point(|&x| x < t);
        if k == 0 {
            (T::zero(), T::zero(), self.forwards[0])
        } else if k == n {
            (self.times[n - 1], self.integrals[n - 1], self.forwards[n - 1])
        } else {
            (self.times[k - 1], self.integrals[k - 1], self.forwards[k])
        }
    }

    /// Integral of the instantaneous forward rate from 0 to `t`.
    fn integral(&self, t: T) -> T {
        let (start, base, fwd) = self.segment(t);
        base + fwd * (t - start)
    }

    /// Instantaneous forward rate at `t`, right-continuous at pillars.
    fn inst_forward(&self, t: T) -> T {
        let k = self.times.partition_point(|&x| x <= t);
        self.forwards[k.min(self.forwards.len() - 1)]
    }
}

impl<T: Float> YieldCurve<T> for InterpolatedCurve<T> {
    fn discount(&self, t: T) -> Result<T, MarketDataError> {
        check_maturity(t)?;
        Ok((-self.integral(t)).exp())
    }

    fn spot_rate(&self, t: T) -> Result<T, MarketDataError> {
        check_maturity(t)?;
        if t == T::zero() {
            return Ok(self.forwards[0]);
        }
        Ok(self.integral(t) / t)
    }

    fn fwd_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        check_maturity(t1)?;
        if t2 < t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: to_f64(t2 - t1),
            });
        }
        if t2 == t1 {
            return Ok(self.inst_forward(t1));
        }
        Ok((self.integral(t2) - self.integral(t1)) / (t2 - t1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_rejects_empty_and_mismatched() {
        assert!(matches!(
            InterpolatedCurve::<f64>::new(&[], &[], CurveInputType::SpotRate),
            Err(MarketDataError::InsufficientData { got: 0, need: 1 })
        ));
        assert!(InterpolatedCurve::new(&[1.0, 2.0], &[0.01], CurveInputType::SpotRate).is_err());
    }

    #[test]
    fn test_rejects_non_increasing_times() {
        let result = InterpolatedCurve::new(&[1.0, 1.0], &[0.01, 0.02], CurveInputType::SpotRate);
        assert!(matches!(result, Err(MarketDataError::InvalidMaturity { .. })));
        let result = InterpolatedCurve::new(&[0.0, 1.0], &[0.01, 0.02], CurveInputType::SpotRate);
        assert!(matches!(result, Err(MarketDataError::InvalidMaturity { .. })));
    }

    #[test]
    fn test_rejects_non_positive_zero_bond() {
        let result = InterpolatedCurve::new(&[1.0], &[0.0], CurveInputType::ZeroBond);
        assert!(matches!(result, Err(MarketDataError::InvalidInput(_))));
    }

    #[test]
    fn test_input_type_from_str() {
        assert_eq!(" spotrate ".parse::<CurveInputType>().unwrap(), CurveInputType::SpotRate);
        assert_eq!("FWDRATE".parse::<CurveInputType>().unwrap(), CurveInputType::FwdRate);
        assert_eq!("ZeroBond".parse::<CurveInputType>().unwrap(), CurveInputType::ZeroBond);
        assert!("PAR".parse::<CurveInputType>().is_err());
    }

    // ========================================
    // Input Type Equivalence Tests
    // ========================================

    #[test]
    fn test_input_types_describe_same_curve() {
        let times = [0.5, 1.0, 3.0];
        let spot = [0.02, 0.025, 0.03];
        let from_spot = InterpolatedCurve::new(&times, &spot, CurveInputType::SpotRate).unwrap();

        let zb: Vec<f64> = times.iter().zip(&spot).map(|(t, r)| (-*r * *t).exp()).collect();
        let from_zb = InterpolatedCurve::new(&times, &zb, CurveInputType::ZeroBond).unwrap();

        let fwd = from_spot.forwards().to_vec();
        let from_fwd = InterpolatedCurve::new(&times, &fwd, CurveInputType::FwdRate).unwrap();

        for t in [0.0, 0.2, 0.5, 0.75, 1.0, 2.0, 3.0, 5.0] {
            let d = from_spot.discount(t).unwrap();
            assert_relative_eq!(from_zb.discount(t).unwrap(), d, epsilon = 1e-14);
            assert_relative_eq!(from_fwd.discount(t).unwrap(), d, epsilon = 1e-14);
        }
    }

    // ========================================
    // Query Tests
    // ========================================

    #[test]
    fn test_pillars_reprice() {
        let curve =
            InterpolatedCurve::new(&[1.0, 2.0, 5.0], &[0.01, 0.02, 0.03], CurveInputType::SpotRate)
                .unwrap();
        assert_relative_eq!(curve.spot_rate(1.0).unwrap(), 0.01, epsilon = 1e-14);
        assert_relative_eq!(curve.spot_rate(2.0).unwrap(), 0.02, epsilon = 1e-14);
        assert_relative_eq!(curve.spot_rate(5.0).unwrap(), 0.03, epsilon = 1e-14);
    }

    #[test]
    fn test_flat_forward_extrapolation() {
        let curve =
            InterpolatedCurve::new(&[1.0, 2.0], &[0.01, 0.02], CurveInputType::FwdRate).unwrap();
        assert_relative_eq!(curve.fwd_rate(2.0, 10.0).unwrap(), 0.02, epsilon = 1e-14);
        assert_relative_eq!(curve.fwd_rate(0.0, 0.5).unwrap(), 0.01, epsilon = 1e-14);
        assert_relative_eq!(curve.fwd_rate(1.0, 1.0).unwrap(), 0.02, epsilon = 1e-14);
        assert_relative_eq!(curve.spot_rate(0.0).unwrap(), 0.01, epsilon = 1e-14);
    }

    #[test]
    fn test_fwd_discount_consistency() {
        let curve =
            InterpolatedCurve::new(&[1.0, 2.0], &[0.01, 0.03], CurveInputType::FwdRate).unwrap();
        let fd = curve.fwd_discount(0.5, 1.5).unwrap();
        assert_relative_eq!(fd, (-(0.5 * 0.01 + 0.5 * 0.03_f64)).exp(), epsilon = 1e-14);
    }
}
