//! SFC64 engine core
//!
//! Small Fast Chaotic generator by Chris Doty-Humphrey, 64-bit variant.
//!
//! # Algorithm
//!
//! The state is four 64-bit words `(a, b, c, w)`. `(a, b, c)` form the chaotic
//! part; `w` is a Weyl counter incremented on every step, which guarantees a
//! minimum period of 2^64. Each step only adds, xors, shifts and rotates.
//!
//! # Seeding
//!
//! - Deterministic: `a = b = c = seed`, `w = 1`, then [`WARMUP_ROUNDS`] outputs
//!   are discarded.
//! - Entropy: `a`, `b`, `c` come from the entropy source, `w = 1`, no warm-up.
//!
//! Engines seeded with distinct seeds do not overlap for at least 2^64 steps.

/// Engine steps discarded after deterministic seeding.
pub const WARMUP_ROUNDS: usize = 12;

/// Raw SFC64 state machine.
///
/// This is the sole source of randomness in the crate. Sub-word buffering,
/// bounded reduction and derived values all compose calls to [`Sfc64::next_u64`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sfc64 {
    a: u64,
    b: u64,
    c: u64,
    w: u64,
}

impl Sfc64 {
    /// Engine seeded deterministically from `seed`, warm-up included.
    ///
    /// # Example
    /// ```
    /// use sfc_rand::Sfc64;
    ///
    /// let mut engine = Sfc64::seeded(1);
    /// assert_eq!(engine.next_u64(), 0x3f7f_cc2e_95d8_fb8b);
    /// ```
    pub fn seeded(seed: u64) -> Self {
        Self::init(seed, seed, seed, 1, WARMUP_ROUNDS)
    }

    /// Engine built from three independent entropy words.
    ///
    /// The words are assumed to be well mixed already, so no warm-up
    /// steps are discarded.
    pub fn from_entropy_words(a: u64, b: u64, c: u64) -> Self {
        Self::init(a, b, c, 1, 0)
    }

    /// Engine with exactly the given state, e.g. a decoded snapshot.
    pub const fn from_state(a: u64, b: u64, c: u64, w: u64) -> Self {
        Self { a, b, c, w }
    }

    /// Current state as `[a, b, c, w]`.
    pub const fn state(&self) -> [u64; 4] {
        [self.a, self.b, self.c, self.w]
    }

    fn init(a: u64, b: u64, c: u64, w: u64, rounds: usize) -> Self {
        let mut engine = Self { a, b, c, w };
        for _ in 0..rounds {
            engine.next_u64();
        }
        engine
    }

    /// Advance one step and return the raw 64-bit output.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let out = self.a.wrapping_add(self.b).wrapping_add(self.w);
        self.w = self.w.wrapping_add(1);
        self.a = self.b ^ (self.b >> 11);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(24).wrapping_add(out);
        out
    }
}
