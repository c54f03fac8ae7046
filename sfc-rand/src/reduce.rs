//! Bounded-range reduction
//!
//! Maps uniformly distributed raw words onto `[0, n)` without a rejection loop.
//! Both algorithms scale the raw word by `n` in fixed point and keep the high
//! half of the 128-bit product.
//!
//! # Bias
//!
//! - [`reduce32`]: a single 64x64 multiply for a 32-bit bound. The result is
//!   biased with probability at most 2^-32. Detecting that takes about 2^64
//!   samples, the same order as the period and seed-separation guarantees.
//! - [`reduce64`]: Stephen Canon's double-multiply correction ("An optimal
//!   algorithm for bounded random integers"). When the fractional part of the
//!   first product is far enough from overflow the high half is returned as is;
//!   otherwise a second word refines the fraction and may carry into the
//!   result. Bias probability is at most 2^-64 and at most two words are used.

/// Full 128-bit product of `a` and `b`, split into `(hi, lo)`.
#[inline]
pub const fn mul_wide(a: u64, b: u64) -> (u64, u64) {
    let product = (a as u128) * (b as u128);
    ((product >> 64) as u64, product as u64)
}

/// Scale the 64-bit word `v` into `[0, n)`.
///
/// Returns 0 when `n == 0`.
#[inline]
pub const fn reduce32(n: u32, v: u64) -> u32 {
    let (hi, _) = mul_wide(n as u64, v);
    // n < 2^32, so the high half always fits
    hi as u32
}

/// Scale the 64-bit word `v` into `[0, n)`, drawing a second word from
/// `second` only when the first product lands in the correction zone.
///
/// # Example
/// ```
/// use sfc_rand::reduce::reduce64;
///
/// // 3 * (2^63) / 2^64 = 1.5; the fraction is far from the threshold
/// assert_eq!(reduce64(3, 1 << 63, || unreachable!()), 1);
/// ```
#[inline]
pub fn reduce64<F>(n: u64, v: u64, second: F) -> u64
where
    F: FnOnce() -> u64,
{
    let (res, frac) = mul_wide(n, v);
    if frac <= n.wrapping_neg() {
        return res;
    }
    let (hi, _) = mul_wide(n, second());
    let (_, carry) = frac.overflowing_add(hi);
    res + carry as u64
}
