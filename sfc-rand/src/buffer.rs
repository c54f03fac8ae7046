//! Sub-word output buffering
//!
//! Keeps the unconsumed part of the most recent raw draw so that 32-bit and
//! byte-sized requests do not throw away engine output.
//!
//! `pos` counts the valid bytes left in `val`. The 32-bit path hands out the
//! high half of a fresh word first (leaving `pos = 4`) and the low half next.
//! The byte path emits `val` from its least significant byte upwards.

use crate::engine::Sfc64;

/// Largest valid buffer position (a whole 64-bit word).
pub const MAX_POS: i8 = 8;

/// Pending bytes of the last raw draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    val: u64,
    pos: i8,
}

impl OutputBuffer {
    /// Empty buffer: the next sub-word request draws a fresh word.
    pub const fn new() -> Self {
        Self { val: 0, pos: 0 }
    }

    /// Buffer with the given raw contents.
    ///
    /// Returns `None` when `pos` is outside `0..=8`.
    pub const fn from_parts(val: u64, pos: i8) -> Option<Self> {
        if pos < 0 || pos > MAX_POS {
            return None;
        }
        Some(Self { val, pos })
    }

    pub const fn val(&self) -> u64 {
        self.val
    }

    pub const fn pos(&self) -> i8 {
        self.pos
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Next 32-bit value, drawing from `engine` at most every other call.
    #[inline]
    pub fn next_u32(&mut self, engine: &mut Sfc64) -> u32 {
        if self.pos < 4 {
            self.val = engine.next_u64();
            self.pos = 4;
            (self.val >> 32) as u32
        } else {
            self.pos = 0;
            self.val as u32
        }
    }

    /// Fill `dest` with buffered bytes, drawing fresh words as needed.
    ///
    /// Splitting one request into several smaller ones yields the same bytes.
    pub fn fill(&mut self, engine: &mut Sfc64, dest: &mut [u8]) {
        let (mut val, mut pos) = (self.val, self.pos);
        for byte in dest.iter_mut() {
            if pos == 0 {
                val = engine.next_u64();
                pos = MAX_POS;
            }
            *byte = val as u8;
            val >>= 8;
            pos -= 1;
        }
        self.val = val;
        self.pos = pos;
    }
}
