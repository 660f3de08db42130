//! Piecewise-flat forward volatility term structure.

use super::VolatilityTermStructure;
use crate::market_data::error::MarketDataError;
use crate::market_data::{check_maturity, to_f64};
use num_traits::Float;
use std::str::FromStr;

/// How the pillar values of a [`VolTermStructure`] are quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum VolInputType {
    /// Spot (term) volatilities to each pillar.
    SpotVol,
    /// Forward volatilities, flat over each interval ending at the pillar.
    FwdVol,
}

impl FromStr for VolInputType {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SPOTVOL" => Ok(Self::SpotVol),
            "FWDVOL" => Ok(Self::FwdVol),
            other => Err(MarketDataError::InvalidInput(format!(
                "unknown volatility input type '{}'",
                other
            ))),
        }
    }
}

/// Volatility term structure with piecewise-flat forward volatility.
///
/// Total variance is piecewise linear in time between pillars; beyond the
/// last pillar the last forward volatility is extrapolated flat.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{VolInputType, VolTermStructure, VolatilityTermStructure};
///
/// let vol: VolTermStructure<f64> =
///     VolTermStructure::new(&[1.0, 2.0], &[0.2, 0.3], VolInputType::FwdVol).unwrap();
///
/// // Spot vol at 2y combines both forward periods
/// let expected = ((0.04 + 0.09) / 2.0_f64).sqrt();
/// assert!((vol.spot_vol(2.0).unwrap() - expected).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VolTermStructure<T: Float> {
    times: Vec<T>,
    variances: Vec<T>,
    fwd_vols: Vec<T>,
}

impl<T: Float> VolTermStructure<T> {
    /// Construct a term structure from pillar times and quotes.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` - No pillars or mismatched lengths
    /// * `InvalidMaturity` - Times not strictly increasing and positive
    /// * `InvalidInput` - Negative or non-finite vol, or spot vols implying
    ///   negative forward variance
    pub fn new(times: &[T], values: &[T], input_type: VolInputType) -> Result<Self, MarketDataError> {
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
        if let Some(v) = values.iter().find(|&&v| v < T::zero() || !v.is_finite()) {
            return Err(MarketDataError::InvalidInput(format!(
                "volatility must be finite and non-negative, got {}",
                to_f64(*v)
            )));
        }

        let mut variances = Vec::with_capacity(times.len());
        let mut fwd_vols = Vec::with_capacity(times.len());
        let mut start = T::zero();
        let mut base = T::zero();
        for (&t, &v) in times.iter().zip(values) {
            let dt = t - start;
            let (var, fwd) = match input_type {
                VolInputType::SpotVol => {
                    let var = v * v * t;
                    if var < base {
                        return Err(MarketDataError::InvalidInput(format!(
                            "spot vol {} at t = {} implies negative forward variance",
                            to_f64(v),
                            to_f64(t)
                        )));
                    }
                    (var, ((var - base) / dt).sqrt())
                }
                VolInputType::FwdVol => (base + v * v * dt, v),
            };
            variances.push(var);
            fwd_vols.push(fwd);
            start = t;
            base = var;
        }

        Ok(Self {
            times: times.to_vec(),
            variances,
            fwd_vols,
        })
    }

    /// Pillar times.
    #[inline]
    pub fn times(&self) -> &[T] {
        &self.times
    }

    /// Flat forward volatility on each interval ending at the matching pillar.
    #[inline]
    pub fn fwd_vols(&self) -> &[T] {
        &self.fwd_vols
    }

    fn variance_at(&self, t: T) -> T {
        let n = self.times.len();
        let k = self.times.partition_point(|&x| x < t);
        let (start, base, fwd) = if k == 0 {
            (T::zero(), T::zero(), self.fwd_vols[0])
        } else if k == n {
            (self.times[n - 1], self.variances[n - 1], self.fwd_vols[n - 1])
        } else {
            (self.times[k - 1], self.variances[k - 1], self.fwd_vols[k])
        };
        base + fwd * fwd * (t - start)
    }
}

impl<T: Float> VolatilityTermStructure<T> for VolTermStructure<T> {
    fn spot_vol(&self, t: T) -> Result<T, MarketDataError> {
        check_maturity(t)?;
        if t == T::zero() {
            return Ok(self.fwd_vols[0]);
        }
        Ok((self.variance_at(t) / t).sqrt())
    }

    fn total_variance(&self, t: T) -> Result<T, MarketDataError> {
        check_maturity(t)?;
        Ok(self.variance_at(t))
    }

    fn fwd_vol(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        check_maturity(t1)?;
        if t2 < t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: to_f64(t2 - t1),
            });
        }
        if t2 == t1 {
            let k = self.times.partition_point(|&x| x <= t1);
            return Ok(self.fwd_vols[k.min(self.fwd_vols.len() - 1)]);
        }
        let var = self.variance_at(t2) - self.variance_at(t1);
        Ok((var.max(T::zero()) / (t2 - t1)).sqrt())
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
    fn test_rejects_bad_schedules() {
        assert!(VolTermStructure::<f64>::new(&[], &[], VolInputType::SpotVol).is_err());
        assert!(VolTermStructure::new(&[2.0, 1.0], &[0.2, 0.2], VolInputType::SpotVol).is_err());
        assert!(VolTermStructure::new(&[1.0], &[-0.2], VolInputType::FwdVol).is_err());
    }

    #[test]
    fn test_rejects_negative_forward_variance() {
        // 0.3^2 * 1 = 0.09 > 0.2^2 * 2 = 0.08
        let result = VolTermStructure::new(&[1.0, 2.0], &[0.3, 0.2], VolInputType::SpotVol);
        assert!(matches!(result, Err(MarketDataError::InvalidInput(_))));
    }

    #[test]
    fn test_input_type_from_str() {
        assert_eq!("spotvol".parse::<VolInputType>().unwrap(), VolInputType::SpotVol);
        assert_eq!(" FWDVOL ".parse::<VolInputType>().unwrap(), VolInputType::FwdVol);
        assert!("LOCALVOL".parse::<VolInputType>().is_err());
    }

    // ========================================
    // Query Tests
    // ========================================

    #[test]
    fn test_spot_vol_pillars_reprice() {
        let vol =
            VolTermStructure::new(&[0.5, 1.0, 2.0], &[0.3, 0.25, 0.22], VolInputType::SpotVol)
                .unwrap();
        assert_relative_eq!(vol.spot_vol(0.5).unwrap(), 0.3, epsilon = 1e-14);
        assert_relative_eq!(vol.spot_vol(1.0).unwrap(), 0.25, epsilon = 1e-14);
        assert_relative_eq!(vol.spot_vol(2.0).unwrap(), 0.22, epsilon = 1e-14);
    }

    #[test]
    fn test_spot_and_fwd_inputs_agree() {
        let times = [0.5, 1.0, 2.0];
        let from_spot =
            VolTermStructure::new(&times, &[0.3, 0.25, 0.22], VolInputType::SpotVol).unwrap();
        let fwd = from_spot.fwd_vols().to_vec();
        let from_fwd = VolTermStructure::new(&times, &fwd, VolInputType::FwdVol).unwrap();
        for t in [0.0, 0.25, 0.5, 1.5, 2.0, 4.0] {
            assert_relative_eq!(
                from_fwd.spot_vol(t).unwrap(),
                from_spot.spot_vol(t).unwrap(),
                epsilon = 1e-14
            );
        }
    }

    #[test]
    fn test_fwd_vol_identity() {
        let vol =
            VolTermStructure::new(&[1.0, 2.0], &[0.2, 0.3], VolInputType::FwdVol).unwrap();
        assert_relative_eq!(vol.fwd_vol(1.0, 2.0).unwrap(), 0.3, epsilon = 1e-14);
        assert_relative_eq!(vol.fwd_vol(0.2, 0.8).unwrap(), 0.2, epsilon = 1e-14);
        assert_relative_eq!(vol.fwd_vol(3.0, 5.0).unwrap(), 0.3, epsilon = 1e-14);
        assert_relative_eq!(vol.fwd_vol(1.0, 1.0).unwrap(), 0.3, epsilon = 1e-14);

        let s1 = vol.spot_vol(0.5).unwrap();
        let s2 = vol.spot_vol(1.5).unwrap();
        let f = vol.fwd_vol(0.5, 1.5).unwrap();
        assert_relative_eq!(f * f, s2 * s2 * 1.5 - s1 * s1 * 0.5, epsilon = 1e-14);
    }
}
