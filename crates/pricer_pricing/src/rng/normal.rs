//! Standard normal variates from uniform or low-discrepancy sources.
//!
//! Normals are produced coordinate by coordinate through the inverse
//! normal CDF. For a Sobol source each call consumes exactly one point and
//! coordinate `i` of the output is the transform of coordinate `i` of the
//! point, which preserves the equidistribution of the sequence.

use super::prng::{MinStdRand, Mt19937, Ranlux24, Ranlux48, UniformRng};
use super::qmc::{LowDiscrepancySequence, SobolSequence, SOBOL_MAX_DIMENSIONS};
use crate::mc::{ConfigError, UrngType};
use pricer_core::math::distributions::inverse_norm_cdf;

/// Uniform source selected by [`UrngType`].
#[derive(Debug, Clone)]
pub enum UniformSource {
    /// Park-Miller LCG
    MinStd(MinStdRand),
    /// Mersenne Twister
    Mt(Mt19937),
    /// RANLUX level 3
    Ranlux3(Ranlux24),
    /// RANLUX level 4
    Ranlux4(Ranlux48),
    /// Sobol sequence of fixed dimension
    Sobol(SobolSequence),
}

impl UniformSource {
    /// Build the source for `urng_type`.
    ///
    /// `dimension` is the number of uniforms consumed per call; it fixes
    /// the Sobol dimension and is ignored by the pseudo-random engines.
    /// `seed` overrides the engine's default seed and is ignored by Sobol.
    ///
    /// # Errors
    ///
    /// `TooManyDimensions` if a Sobol source is requested with zero or more
    /// than [`SOBOL_MAX_DIMENSIONS`] dimensions.
    pub fn new(
        urng_type: UrngType,
        dimension: usize,
        seed: Option<u32>,
    ) -> Result<Self, ConfigError> {
        let source = match urng_type {
            UrngType::MinStdRand => {
                UniformSource::MinStd(MinStdRand::new(seed.unwrap_or(MinStdRand::DEFAULT_SEED)))
            }
            UrngType::Mt19937 => {
                UniformSource::Mt(Mt19937::new(seed.unwrap_or(Mt19937::DEFAULT_SEED)))
            }
            UrngType::Ranlux3 => {
                UniformSource::Ranlux3(Ranlux24::new(seed.unwrap_or(Ranlux24::DEFAULT_SEED)))
            }
            UrngType::Ranlux4 => {
                UniformSource::Ranlux4(Ranlux48::new(seed.unwrap_or(Ranlux48::DEFAULT_SEED)))
            }
            UrngType::Sobol => UniformSource::Sobol(SobolSequence::new(dimension).ok_or(
                ConfigError::TooManyDimensions {
                    requested: dimension,
                    max: SOBOL_MAX_DIMENSIONS,
                },
            )?),
        };
        Ok(source)
    }

    /// Fixed dimension for low-discrepancy sources.
    pub fn dimension(&self) -> Option<usize> {
        match self {
            UniformSource::Sobol(s) => Some(s.dimension()),
            _ => None,
        }
    }

    /// Fill `out` with uniforms in (0, 1).
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the source is a Sobol sequence whose dimension
    /// differs from `out.len()`.
    pub fn next(&mut self, out: &mut [f64]) -> Result<(), ConfigError> {
        match self {
            UniformSource::MinStd(r) => r.fill_uniform(out),
            UniformSource::Mt(r) => r.fill_uniform(out),
            UniformSource::Ranlux3(r) => r.fill_uniform(out),
            UniformSource::Ranlux4(r) => r.fill_uniform(out),
            UniformSource::Sobol(s) => {
                if s.dimension() != out.len() {
                    return Err(ConfigError::InvalidParameter {
                        name: "dimension",
                        value: format!(
                            "requested {} uniforms from a {}-dimensional Sobol sequence",
                            out.len(),
                            s.dimension()
                        ),
                    });
                }
                out.copy_from_slice(s.next_point());
            }
        }
        Ok(())
    }
}

/// Generator of standard normal variates.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::UrngType;
/// use pricer_pricing::rng::NormalRng;
///
/// let mut rng = NormalRng::new(UrngType::Sobol, 3, None).unwrap();
/// let mut z = vec![0.0; 3];
/// rng.next(&mut z).unwrap();
/// // First Sobol point is 0.5 in every coordinate
/// assert_eq!(z, vec![0.0; 3]);
/// ```
#[derive(Debug, Clone)]
pub struct NormalRng {
    source: UniformSource,
}

impl NormalRng {
    /// Normal generator over the source selected by `urng_type`.
    ///
    /// See [`UniformSource::new`].
    pub fn new(
        urng_type: UrngType,
        dimension: usize,
        seed: Option<u32>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            source: UniformSource::new(urng_type, dimension, seed)?,
        })
    }

    /// Normal generator over an existing source.
    pub fn from_source(source: UniformSource) -> Self {
        Self { source }
    }

    /// Underlying uniform source.
    pub fn source(&self) -> &UniformSource {
        &self.source
    }

    /// Fill `out` with independent standard normals.
    pub fn next(&mut self, out: &mut [f64]) -> Result<(), ConfigError> {
        self.source.next(out)?;
        for x in out.iter_mut() {
            *x = inverse_norm_cdf(*x);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sobol_dimension_limits() {
        assert!(matches!(
            NormalRng::new(UrngType::Sobol, SOBOL_MAX_DIMENSIONS + 1, None),
            Err(ConfigError::TooManyDimensions { requested: 21_202, max: 21_201 })
        ));
        assert!(NormalRng::new(UrngType::Mt19937, 1000, None).is_ok());
    }

    #[test]
    fn test_sobol_length_mismatch() {
        let mut rng = NormalRng::new(UrngType::Sobol, 2, None).unwrap();
        let mut z = vec![0.0; 3];
        assert!(matches!(
            rng.next(&mut z),
            Err(ConfigError::InvalidParameter { name: "dimension", .. })
        ));
    }

    #[test]
    fn test_sobol_normals_are_coordinatewise() {
        let mut rng = NormalRng::new(UrngType::Sobol, 2, None).unwrap();
        let mut sobol = SobolSequence::new(2).unwrap();
        let mut z = vec![0.0; 2];
        for _ in 0..16 {
            rng.next(&mut z).unwrap();
            let p = sobol.next_point();
            assert_eq!(z[0], inverse_norm_cdf(p[0]));
            assert_eq!(z[1], inverse_norm_cdf(p[1]));
        }
    }

    #[test]
    fn test_pseudo_random_normal_moments() {
        for urng in [
            UrngType::MinStdRand,
            UrngType::Mt19937,
            UrngType::Ranlux3,
            UrngType::Ranlux4,
        ] {
            let mut rng = NormalRng::new(urng, 1, Some(7)).unwrap();
            let mut z = vec![0.0; 20_000];
            rng.next(&mut z).unwrap();
            assert!(z.iter().all(|x| x.is_finite()));
            let n = z.len() as f64;
            let mean = z.iter().sum::<f64>() / n;
            let var = z.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
            assert!(mean.abs() < 0.03, "{:?} mean = {}", urng, mean);
            assert!((var - 1.0).abs() < 0.05, "{:?} var = {}", urng, var);
        }
    }

    #[test]
    fn test_seed_override() {
        let mut a = NormalRng::new(UrngType::Mt19937, 1, Some(1)).unwrap();
        let mut b = NormalRng::new(UrngType::Mt19937, 1, None).unwrap();
        let mut za = [0.0; 4];
        let mut zb = [0.0; 4];
        a.next(&mut za).unwrap();
        b.next(&mut zb).unwrap();
        assert_ne!(za, zb);
    }
}
