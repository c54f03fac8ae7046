//! SFC64-backed pseudo-random number generator
//!
//! [`Rand`] owns one engine and one output buffer. It is single-owner and has
//! no internal synchronization; use one instance per thread and move state
//! between instances with [`Rand::to_bytes`] / [`Rand::from_bytes`].
//!
//! Every operation is a bounded sequence of integer steps. The worst case is
//! two engine draws per bounded value.

use crate::buffer::OutputBuffer;
use crate::engine::Sfc64;
use crate::error::Result;
use crate::reduce::{reduce32, reduce64};
use crate::state::RandSnapshot;
use rand_core::{OsRng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

const INT24_MASK: u32 = (1 << 24) - 1;
const INT31_MASK: u32 = (1 << 31) - 1;
const INT53_MASK: u64 = (1 << 53) - 1;
const INT63_MASK: u64 = (1 << 63) - 1;

const F24_MUL: f32 = 1.0 / (1u32 << 24) as f32;
const F53_MUL: f64 = 1.0 / (1u64 << 53) as f64;

/// Highest shuffle index served by the 32-bit reduction.
const SHUFFLE_U32_LIMIT: usize = u32::MAX as usize - 1;

/// Pseudo-random number generator based on SFC64.
///
/// 256 bits of state, average period of ~2^255 and a minimum period of 2^64.
/// Generators seeded with distinct seeds do not run into each other for at
/// least 2^64 draws. Not suitable for cryptographic use.
///
/// # Example
/// ```
/// use sfc_rand::Rand;
///
/// let mut rng = Rand::with_seed(12345);
/// let die = rng.intn(6) + 1;
/// assert!((1..=6).contains(&die));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RandSnapshot", try_from = "RandSnapshot")]
pub struct Rand {
    pub(crate) engine: Sfc64,
    pub(crate) buf: OutputBuffer,
}

impl Rand {
    /// Generator in a non-deterministic state, seeded from OS entropy.
    ///
    /// Panics if the operating system entropy source fails; see
    /// [`Rand::try_new`] for the fallible variant.
    pub fn new() -> Self {
        Self::from_entropy_source(&mut OsRng)
    }

    /// Generator seeded from OS entropy, reporting entropy failures.
    pub fn try_new() -> Result<Self> {
        Self::try_from_entropy_source(&mut OsRng)
    }

    /// Like [`Rand::from_entropy_source`], but a failing source is reported
    /// as [`RandError::Entropy`](crate::RandError::Entropy) carrying the
    /// source's own error.
    pub fn try_from_entropy_source<R: RngCore + ?Sized>(source: &mut R) -> Result<Self> {
        let mut words = [0u8; 24];
        source.try_fill_bytes(&mut words)?;
        let word = |i: usize| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(&words[i * 8..i * 8 + 8]);
            u64::from_le_bytes(bytes)
        };
        rand_trace!("seeding generator from entropy source");
        Ok(Self::from_engine(Sfc64::from_entropy_words(
            word(0),
            word(1),
            word(2),
        )))
    }

    /// Generator seeded with three words from `source`, without warm-up.
    ///
    /// # Example
    /// ```
    /// use sfc_rand::Rand;
    ///
    /// let mut entropy = Rand::with_seed(7);
    /// let mut rng = Rand::from_entropy_source(&mut entropy);
    /// let _ = rng.next_u64();
    /// ```
    pub fn from_entropy_source<R: RngCore + ?Sized>(source: &mut R) -> Self {
        let a = source.next_u64();
        let b = source.next_u64();
        let c = source.next_u64();
        rand_trace!("seeding generator from entropy source");
        Self::from_engine(Sfc64::from_entropy_words(a, b, c))
    }

    /// Generator seeded deterministically with `seed`.
    ///
    /// # Example
    /// ```
    /// use sfc_rand::Rand;
    ///
    /// let mut rng = Rand::with_seed(1);
    /// assert_eq!(rng.next_u64(), 0x3f7f_cc2e_95d8_fb8b);
    /// ```
    pub fn with_seed(seed: u64) -> Self {
        rand_trace!("seeding generator with {}", seed);
        Self::from_engine(Sfc64::seeded(seed))
    }

    /// Reset to the deterministic state for `seed`, dropping buffered output.
    pub fn seed(&mut self, seed: u64) {
        rand_trace!("reseeding generator with {}", seed);
        self.engine = Sfc64::seeded(seed);
        self.buf.clear();
    }

    pub(crate) fn from_engine(engine: Sfc64) -> Self {
        Self {
            engine,
            buf: OutputBuffer::new(),
        }
    }

    /// Raw 64-bit value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.engine.next_u64()
    }

    /// 32-bit value. Two consecutive calls share one engine draw.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.buf.next_u32(&mut self.engine)
    }

    /// Fill `dest` with random bytes.
    ///
    /// Output does not depend on how a byte stream is split across calls.
    pub fn fill(&mut self, dest: &mut [u8]) {
        self.buf.fill(&mut self.engine, dest);
    }

    /// `f64` in the half-open interval `[0.0, 1.0)`.
    pub fn f64(&mut self) -> f64 {
        (self.next_u64() & INT53_MASK) as f64 * F53_MUL
    }

    /// `f32` in the half-open interval `[0.0, 1.0)`.
    pub fn f32(&mut self) -> f32 {
        (self.next_u32() & INT24_MASK) as f32 * F24_MUL
    }

    /// Non-negative 31-bit integer.
    pub fn int31(&mut self) -> i32 {
        (self.next_u32() & INT31_MASK) as i32
    }

    /// Non-negative 63-bit integer.
    pub fn int63(&mut self) -> i64 {
        (self.next_u64() & INT63_MASK) as i64
    }

    /// Non-negative `isize`.
    pub fn int(&mut self) -> isize {
        #[cfg(target_pointer_width = "64")]
        {
            self.int63() as isize
        }
        #[cfg(not(target_pointer_width = "64"))]
        {
            self.int31() as isize
        }
    }

    /// Uniform value in `[0, n)`. Returns 0 without drawing when `n == 0`.
    ///
    /// Biased with probability at most 2^-32.
    #[inline]
    pub fn uint32n(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        reduce32(n, self.engine.next_u64())
    }

    /// Uniform value in `[0, n)`. Returns 0 without drawing when `n == 0`.
    ///
    /// Biased with probability at most 2^-64; uses at most two draws.
    #[inline]
    pub fn uint64n(&mut self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        let engine = &mut self.engine;
        let v = engine.next_u64();
        reduce64(n, v, || engine.next_u64())
    }

    /// Uniform value in `[0, n)`.
    ///
    /// # Panics
    /// Panics if `n <= 0`.
    pub fn int31n(&mut self, n: i32) -> i32 {
        assert!(n > 0, "invalid argument to int31n");
        self.uint32n(n as u32) as i32
    }

    /// Uniform value in `[0, n)`.
    ///
    /// # Panics
    /// Panics if `n <= 0`.
    pub fn int63n(&mut self, n: i64) -> i64 {
        assert!(n > 0, "invalid argument to int63n");
        self.uint64n(n as u64) as i64
    }

    /// Uniform value in `[0, n)`.
    ///
    /// # Panics
    /// Panics if `n <= 0`.
    pub fn intn(&mut self, n: isize) -> isize {
        assert!(n > 0, "invalid argument to intn");
        #[cfg(target_pointer_width = "64")]
        {
            self.uint64n(n as u64) as isize
        }
        #[cfg(not(target_pointer_width = "64"))]
        {
            self.uint32n(n as u32) as isize
        }
    }

    /// Random permutation of `0..n`.
    ///
    /// # Example
    /// ```
    /// use sfc_rand::Rand;
    ///
    /// let mut p = Rand::with_seed(3).perm(5);
    /// p.sort_unstable();
    /// assert_eq!(p, vec![0, 1, 2, 3, 4]);
    /// ```
    pub fn perm(&mut self, n: usize) -> Vec<usize> {
        let mut p = vec![0; n];
        // inside-out Fisher-Yates over the identity
        for i in 1..n {
            let j = self.uint64n(i as u64 + 1) as usize;
            p[i] = p[j];
            p[j] = i;
        }
        p
    }

    /// Shuffle `n` elements by calling `swap(i, j)` for each exchange.
    ///
    /// Indices passed to `swap` are always within `0..n`. Lengths 0 and 1
    /// never call `swap`.
    pub fn shuffle<F>(&mut self, n: usize, mut swap: F)
    where
        F: FnMut(usize, usize),
    {
        if n < 2 {
            return;
        }
        for i in (1..n).rev() {
            let j = self.shuffle_index(i);
            swap(i, j);
        }
    }

    /// Uniform index in `[0, i]`, using the 32-bit reduction while `i + 1`
    /// fits in a `u32`.
    #[inline]
    fn shuffle_index(&mut self, i: usize) -> usize {
        if i > SHUFFLE_U32_LIMIT {
            self.uint64n(i as u64 + 1) as usize
        } else {
            self.uint32n(i as u32 + 1) as usize
        }
    }

    /// Shuffle a slice in place. Same draws as [`Rand::shuffle`].
    pub fn shuffle_slice<T>(&mut self, s: &mut [T]) {
        let n = s.len();
        self.shuffle(n, |i, j| s.swap(i, j));
    }
}

impl Default for Rand {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for Rand {
    fn next_u32(&mut self) -> u32 {
        Rand::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        Rand::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fill(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand_core::Error> {
        self.fill(dest);
        Ok(())
    }
}

impl SeedableRng for Rand {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::with_seed(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::with_seed(state)
    }
}

impl std::io::Read for Rand {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.fill(buf);
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reseed_clears_buffer() {
        let mut rng = Rand::with_seed(5);
        rng.next_u32();
        assert_eq!(rng.buf.pos(), 4);

        rng.seed(5);
        assert_eq!(rng, Rand::with_seed(5));
    }

    #[test]
    fn test_entropy_seeding_has_no_warmup() {
        let mut source = Rand::with_seed(9);
        let (a, b, c) = {
            let mut peek = source.clone();
            (peek.next_u64(), peek.next_u64(), peek.next_u64())
        };
        let rng = Rand::from_entropy_source(&mut source);
        assert_eq!(rng.engine.state(), [a, b, c, 1]);
        assert_eq!(rng.buf, OutputBuffer::new());
    }

    #[test]
    fn test_nondeterministic_generators_differ() {
        let mut r1 = Rand::new();
        let mut r2 = Rand::try_new().unwrap();
        let s1: Vec<u64> = (0..4).map(|_| r1.next_u64()).collect();
        let s2: Vec<u64> = (0..4).map(|_| r2.next_u64()).collect();
        assert_ne!(s1, s2);
    }

    #[test]
    fn test_shuffle_index_below_cutoff_uses_reduce32() {
        let i = u32::MAX as usize - 1;
        let mut rng = Rand::with_seed(21);
        let mut reference = Rand::with_seed(21);

        let j = rng.shuffle_index(i);
        let expected = reduce32(u32::MAX, reference.next_u64()) as usize;

        assert_eq!(j, expected);
        assert!(j <= i);
        assert_eq!(rng, reference, "one draw below the cutoff");
    }

    #[test]
    fn test_shuffle_index_above_cutoff_uses_uint64n() {
        let i = u32::MAX as usize;
        for seed in 0..64 {
            let mut rng = Rand::with_seed(seed);
            let mut reference = Rand::with_seed(seed);

            let j = rng.shuffle_index(i);
            let expected = reference.uint64n(i as u64 + 1) as usize;

            assert_eq!(j, expected);
            assert!(j <= i);
            assert_eq!(rng, reference, "same draw count as uint64n");
        }
    }

    #[test]
    fn test_shuffle_index_above_cutoff_reaches_full_range() {
        // v = MAX scales to the top of [0, 2^32], which the 32-bit path cannot produce
        let i = u32::MAX as usize;
        let mut rng = Rand {
            engine: Sfc64::from_state(u64::MAX, 0, 0, 0),
            buf: OutputBuffer::new(),
        };
        let mut reference = rng.clone();
        let j = rng.shuffle_index(i);
        assert_eq!(j, reference.uint64n(1 << 32) as usize);
        assert_eq!(j, u32::MAX as usize);
    }

    #[test]
    fn test_try_from_entropy_source_keeps_source_error() {
        struct Failing;

        impl RngCore for Failing {
            fn next_u32(&mut self) -> u32 {
                unreachable!()
            }
            fn next_u64(&mut self) -> u64 {
                unreachable!()
            }
            fn fill_bytes(&mut self, _: &mut [u8]) {
                unreachable!()
            }
            fn try_fill_bytes(&mut self, _: &mut [u8]) -> std::result::Result<(), rand_core::Error> {
                let code = std::num::NonZeroU32::new(rand_core::Error::CUSTOM_START + 7).unwrap();
                Err(rand_core::Error::from(code))
            }
        }

        match Rand::try_from_entropy_source(&mut Failing) {
            Err(crate::RandError::Entropy(err)) => {
                assert_eq!(err.code().map(|c| c.get()), Some(rand_core::Error::CUSTOM_START + 7));
            }
            other => panic!("expected entropy error, got {:?}", other),
        }
    }

    #[test]
    fn test_try_from_entropy_source_matches_infallible() {
        let mut s1 = Rand::with_seed(4);
        let mut s2 = Rand::with_seed(4);
        let a = Rand::try_from_entropy_source(&mut s1).unwrap();
        let b = Rand::from_entropy_source(&mut s2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_bound_draws_nothing() {
        let mut rng = Rand::with_seed(1);
        assert_eq!(rng.uint32n(0), 0);
        assert_eq!(rng.uint64n(0), 0);
        assert_eq!(rng, Rand::with_seed(1));
    }

    #[test]
    fn test_f64_uses_low_53_bits() {
        let mut rng = Rand::with_seed(1);
        let expected = (0x3f7f_cc2e_95d8_fb8b_u64 & INT53_MASK) as f64 / (1u64 << 53) as f64;
        assert_eq!(rng.f64(), expected);
    }

    #[test]
    fn test_f32_uses_buffered_halves() {
        let mut rng = Rand::with_seed(1);
        assert_eq!(rng.f32(), (0x3f7f_cc2e & INT24_MASK) as f32 / (1u32 << 24) as f32);
        assert_eq!(rng.f32(), (0x95d8_fb8b & INT24_MASK) as f32 / (1u32 << 24) as f32);
    }

    #[test]
    fn test_int31_clears_top_bit() {
        let mut rng = Rand::with_seed(1);
        rng.next_u32();
        // low half 0x95d8fb8b has its top bit set
        assert_eq!(rng.int31(), 0x15d8_fb8b);
    }

    #[test]
    #[should_panic(expected = "invalid argument to int31n")]
    fn test_int31n_rejects_zero() {
        Rand::with_seed(1).int31n(0);
    }

    #[test]
    #[should_panic(expected = "invalid argument to int63n")]
    fn test_int63n_rejects_negative() {
        Rand::with_seed(1).int63n(-5);
    }

    #[test]
    #[should_panic(expected = "invalid argument to intn")]
    fn test_intn_rejects_negative() {
        Rand::with_seed(1).intn(-1);
    }

    #[test]
    fn test_io_read_fills_everything() {
        use std::io::Read;

        let mut rng = Rand::with_seed(1);
        let mut out = [0u8; 13];
        assert_eq!(rng.read(&mut out).unwrap(), 13);
        assert_eq!(&out[..8], &0x3f7f_cc2e_95d8_fb8b_u64.to_le_bytes());
    }

    #[test]
    fn test_seedable_rng_matches_with_seed() {
        let mut a = Rand::seed_from_u64(77);
        let mut b = Rand::from_seed(77u64.to_le_bytes());
        let mut c = Rand::with_seed(77);
        let x = c.next_u64();
        assert_eq!(RngCore::next_u64(&mut a), x);
        assert_eq!(RngCore::next_u64(&mut b), x);
    }
}
