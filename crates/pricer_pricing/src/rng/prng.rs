//! Pseudo-random engines with reference-reproducible output.
//!
//! Each engine reproduces the raw sequence of the corresponding C++
//! standard-library engine for the same seed, so simulated prices can be
//! compared draw for draw with other implementations:
//!
//! | Engine | Algorithm | Default seed |
//! |--------|-----------|--------------|
//! | [`MinStdRand`] | Park-Miller LCG, a = 48271, m = 2³¹ - 1 | 1 |
//! | [`Mt19937`] | 32-bit Mersenne Twister | 5489 |
//! | [`Ranlux24`] | subtract-with-carry 24/10/24, discard block 223/23 | 19780503 |
//! | [`Ranlux48`] | subtract-with-carry 48/5/12, discard block 389/11 | 19780503 |
//!
//! Uniform draws ([`UniformRng::next_uniform`]) lie in the open interval
//! (0, 1), so an inverse normal CDF applied to them is always finite.

use rand::RngCore;

/// Source of uniform variates in the open interval (0, 1).
pub trait UniformRng {
    /// Next uniform variate.
    fn next_uniform(&mut self) -> f64;

    /// Fill `out` with consecutive uniform variates.
    #[inline]
    fn fill_uniform(&mut self, out: &mut [f64]) {
        for u in out.iter_mut() {
            *u = self.next_uniform();
        }
    }
}

/// Implements `RngCore` on top of an inherent `next_raw`.
///
/// The raw output of `MinStdRand` and the RANLUX engines does not span the
/// full 32-bit range; use [`UniformRng`] for simulation draws.
macro_rules! impl_rng_core {
    ($ty:ty) => {
        impl RngCore for $ty {
            #[inline]
            fn next_u32(&mut self) -> u32 {
                self.next_raw() as u32
            }

            #[inline]
            fn next_u64(&mut self) -> u64 {
                let lo = u64::from(self.next_u32());
                let hi = u64::from(self.next_u32());
                (hi << 32) | lo
            }

            fn fill_bytes(&mut self, dest: &mut [u8]) {
                for chunk in dest.chunks_mut(4) {
                    let bytes = self.next_u32().to_le_bytes();
                    chunk.copy_from_slice(&bytes[..chunk.len()]);
                }
            }

            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                self.fill_bytes(dest);
                Ok(())
            }
        }
    };
}

// ============================================================================
// MinStdRand
// ============================================================================

const MINSTD_A: u64 = 48_271;
const MINSTD_M: u64 = 2_147_483_647;

/// Park-Miller "minimal standard" linear congruential engine.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::{MinStdRand, UniformRng};
///
/// let mut rng = MinStdRand::default();
/// assert_eq!(rng.next_raw(), 48_271);
///
/// let u = rng.next_uniform();
/// assert!(u > 0.0 && u < 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinStdRand {
    state: u64,
}

impl MinStdRand {
    /// Default seed.
    pub const DEFAULT_SEED: u32 = 1;

    /// Engine seeded with `seed`; a seed congruent to zero is replaced by 1.
    pub fn new(seed: u32) -> Self {
        let state = u64::from(seed) % MINSTD_M;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Next raw output in [1, 2³¹ - 2].
    #[inline]
    pub fn next_raw(&mut self) -> u64 {
        self.state = self.state * MINSTD_A % MINSTD_M;
        self.state
    }
}

impl Default for MinStdRand {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl UniformRng for MinStdRand {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.next_raw() as f64 / MINSTD_M as f64
    }
}

impl_rng_core!(MinStdRand);

// ============================================================================
// Mt19937
// ============================================================================

const MT_N: usize = 624;
const MT_M: usize = 397;
const MT_MATRIX_A: u32 = 0x9908_b0df;
const MT_UPPER_MASK: u32 = 0x8000_0000;
const MT_LOWER_MASK: u32 = 0x7fff_ffff;

/// 32-bit Mersenne Twister.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::Mt19937;
///
/// let mut rng = Mt19937::default();
/// assert_eq!(rng.next_raw(), 3_499_211_612);
/// ```
#[derive(Clone)]
pub struct Mt19937 {
    mt: Box<[u32; MT_N]>,
    idx: usize,
}

impl Mt19937 {
    /// Default seed.
    pub const DEFAULT_SEED: u32 = 5489;

    /// Engine seeded with `seed`.
    pub fn new(seed: u32) -> Self {
        let mut mt = Box::new([0u32; MT_N]);
        mt[0] = seed;
        for i in 1..MT_N {
            let prev = mt[i - 1];
            mt[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self { mt, idx: MT_N }
    }

    fn twist(&mut self) {
        for i in 0..MT_N {
            let y = (self.mt[i] & MT_UPPER_MASK) | (self.mt[(i + 1) % MT_N] & MT_LOWER_MASK);
            let mag = if y & 1 == 1 { MT_MATRIX_A } else { 0 };
            self.mt[i] = self.mt[(i + MT_M) % MT_N] ^ (y >> 1) ^ mag;
        }
        self.idx = 0;
    }

    /// Next raw 32-bit output.
    #[inline]
    pub fn next_raw(&mut self) -> u64 {
        if self.idx >= MT_N {
            self.twist();
        }
        let mut y = self.mt[self.idx];
        self.idx += 1;
        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        u64::from(y)
    }
}

impl Default for Mt19937 {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl std::fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt19937").field("idx", &self.idx).finish_non_exhaustive()
    }
}

impl UniformRng for Mt19937 {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (self.next_raw() as f64 + 0.5) / 4_294_967_296.0
    }
}

impl_rng_core!(Mt19937);

// ============================================================================
// RANLUX
// ============================================================================

/// Default seed of the subtract-with-carry engines.
pub const RANLUX_DEFAULT_SEED: u32 = 19_780_503;

/// Seeding LCG of the subtract-with-carry engines (a = 40014, m = 2147483563).
struct SeedLcg(u64);

impl SeedLcg {
    const M: u64 = 2_147_483_563;

    fn new(seed: u32) -> Self {
        let s = u64::from(seed) % Self::M;
        SeedLcg(if s == 0 { 1 } else { s })
    }

    fn next(&mut self) -> u64 {
        self.0 = self.0 * 40_014 % Self::M;
        self.0
    }
}

/// Subtract-with-carry engine with word size `W`, short lag `S` and long lag `R`.
///
/// This is the base engine of RANLUX; on its own it has known statistical
/// defects and is exposed for verification only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtractWithCarry<const W: u32, const S: usize, const R: usize> {
    x: [u64; R],
    carry: u64,
    k: usize,
}

impl<const W: u32, const S: usize, const R: usize> SubtractWithCarry<W, S, R> {
    const MODULUS: u64 = 1 << W;

    /// Engine seeded with `seed` (zero selects [`RANLUX_DEFAULT_SEED`]).
    pub fn new(seed: u32) -> Self {
        let mut lcg = SeedLcg::new(if seed == 0 { RANLUX_DEFAULT_SEED } else { seed });
        let words = W.div_ceil(32);
        let mut x = [0u64; R];
        for xi in x.iter_mut() {
            let mut sum = 0u64;
            for j in 0..words {
                sum = sum.wrapping_add(lcg.next() << (32 * j));
            }
            *xi = sum % Self::MODULUS;
        }
        let carry = u64::from(x[R - 1] == 0);
        Self { x, carry, k: 0 }
    }

    /// Next raw output in [0, 2^W).
    #[inline]
    pub fn next_raw(&mut self) -> u64 {
        let short = (self.k + R - S) % R;
        let xs = self.x[short];
        let xr = self.x[self.k];
        let y = if xs >= xr + self.carry {
            let y = xs - xr - self.carry;
            self.carry = 0;
            y
        } else {
            let y = Self::MODULUS - xr - self.carry + xs;
            self.carry = 1;
            y
        };
        self.x[self.k] = y;
        self.k = (self.k + 1) % R;
        y
    }
}

/// RANLUX: a subtract-with-carry engine that keeps `BLOCK` outputs out of
/// every `P` and discards the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranlux<const W: u32, const S: usize, const R: usize, const P: usize, const BLOCK: usize>
{
    base: SubtractWithCarry<W, S, R>,
    used: usize,
}

impl<const W: u32, const S: usize, const R: usize, const P: usize, const BLOCK: usize>
    Ranlux<W, S, R, P, BLOCK>
{
    /// Default seed.
    pub const DEFAULT_SEED: u32 = RANLUX_DEFAULT_SEED;

    /// Engine seeded with `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            base: SubtractWithCarry::new(seed),
            used: 0,
        }
    }

    /// Next raw output in [0, 2^W).
    #[inline]
    pub fn next_raw(&mut self) -> u64 {
        if self.used >= BLOCK {
            for _ in 0..P - BLOCK {
                self.base.next_raw();
            }
            self.used = 0;
        }
        self.used += 1;
        self.base.next_raw()
    }
}

impl<const W: u32, const S: usize, const R: usize, const P: usize, const BLOCK: usize> Default
    for Ranlux<W, S, R, P, BLOCK>
{
    fn default() -> Self {
        Self::new(RANLUX_DEFAULT_SEED)
    }
}

impl<const W: u32, const S: usize, const R: usize, const P: usize, const BLOCK: usize> UniformRng
    for Ranlux<W, S, R, P, BLOCK>
{
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (self.next_raw() as f64 + 0.5) / (1u64 << W) as f64
    }
}

impl<const W: u32, const S: usize, const R: usize, const P: usize, const BLOCK: usize> RngCore
    for Ranlux<W, S, R, P, BLOCK>
{
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.next_raw() as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_u32());
        let hi = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Base engine of [`Ranlux24`].
pub type Ranlux24Base = SubtractWithCarry<24, 10, 24>;

/// Base engine of [`Ranlux48`].
pub type Ranlux48Base = SubtractWithCarry<48, 5, 12>;

/// RANLUX level 3 (24-bit).
pub type Ranlux24 = Ranlux<24, 10, 24, 223, 23>;

/// RANLUX level 4 (48-bit).
pub type Ranlux48 = Ranlux<48, 5, 12, 389, 11>;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn nth_raw(mut f: impl FnMut() -> u64, n: usize) -> u64 {
        for _ in 1..n {
            f();
        }
        f()
    }

    // ==========================================================
    // Reference Sequences (10000th draw of default-seeded engines)
    // ==========================================================

    #[test]
    fn test_minstd_reference() {
        let mut rng = MinStdRand::default();
        assert_eq!(nth_raw(|| rng.next_raw(), 10_000), 399_268_537);
    }

    #[test]
    fn test_mt19937_reference() {
        let mut rng = Mt19937::default();
        assert_eq!(nth_raw(|| rng.next_raw(), 10_000), 4_123_659_995);
    }

    #[test]
    fn test_ranlux24_base_reference() {
        let mut rng = Ranlux24Base::new(RANLUX_DEFAULT_SEED);
        assert_eq!(nth_raw(|| rng.next_raw(), 10_000), 7_937_952);
    }

    #[test]
    fn test_ranlux48_base_reference() {
        let mut rng = Ranlux48Base::new(RANLUX_DEFAULT_SEED);
        assert_eq!(nth_raw(|| rng.next_raw(), 10_000), 61_839_128_582_725);
    }

    #[test]
    fn test_ranlux24_reference() {
        let mut rng = Ranlux24::default();
        assert_eq!(nth_raw(|| rng.next_raw(), 10_000), 9_901_578);
    }

    #[test]
    fn test_ranlux48_reference() {
        let mut rng = Ranlux48::default();
        assert_eq!(nth_raw(|| rng.next_raw(), 10_000), 249_142_670_248_501);
    }

    // ==========================================================
    // Seeding
    // ==========================================================

    #[test]
    fn test_minstd_zero_seed_maps_to_one() {
        assert_eq!(MinStdRand::new(0), MinStdRand::new(1));
        assert_eq!(MinStdRand::new(2_147_483_647), MinStdRand::new(1));
    }

    #[test]
    fn test_ranlux_zero_seed_is_default() {
        assert_eq!(Ranlux24::new(0), Ranlux24::default());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Mt19937::new(42);
        let mut b = Mt19937::new(42);
        let mut c = Mt19937::new(43);
        let xa: Vec<u64> = (0..100).map(|_| a.next_raw()).collect();
        let xb: Vec<u64> = (0..100).map(|_| b.next_raw()).collect();
        let xc: Vec<u64> = (0..100).map(|_| c.next_raw()).collect();
        assert_eq!(xa, xb);
        assert_ne!(xa, xc);
    }

    // ==========================================================
    // Uniform Mapping
    // ==========================================================

    #[test]
    fn test_uniforms_in_open_interval() {
        let mut engines: Vec<Box<dyn UniformRng>> = vec![
            Box::new(MinStdRand::default()),
            Box::new(Mt19937::default()),
            Box::new(Ranlux24::default()),
            Box::new(Ranlux48::default()),
        ];
        for engine in engines.iter_mut() {
            let mut buf = vec![0.0; 5_000];
            engine.fill_uniform(&mut buf);
            assert!(buf.iter().all(|&u| u > 0.0 && u < 1.0));
            let mean = buf.iter().sum::<f64>() / buf.len() as f64;
            assert!((mean - 0.5).abs() < 0.02, "mean = {}", mean);
        }
    }

    #[test]
    fn test_uniform_extremes_are_interior() {
        // (x + 0.5) / 2^32 for x = 0 and x = 2^32 - 1
        let lo = 0.5 / 4_294_967_296.0;
        let hi = (4_294_967_295.0 + 0.5) / 4_294_967_296.0;
        assert!(lo > 0.0);
        assert!(hi < 1.0);
    }

    // ==========================================================
    // rand Interop
    // ==========================================================

    #[test]
    fn test_rng_core_interop() {
        let mut rng = Mt19937::default();
        let x: f64 = rng.gen_range(-1.0..1.0);
        assert!((-1.0..1.0).contains(&x));

        let mut bytes = [0u8; 7];
        let mut check = Mt19937::default();
        rng = Mt19937::default();
        rng.fill_bytes(&mut bytes);
        let first = (check.next_raw() as u32).to_le_bytes();
        assert_eq!(&bytes[..4], &first);
    }
}
