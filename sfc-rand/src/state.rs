//! Generator state serialization
//!
//! Binary layout, little-endian, no format tag:
//!
//! | offset | size | field |
//! |--------|------|-------|
//! | 0      | 8    | `a`   |
//! | 8      | 8    | `b`   |
//! | 16     | 8    | `c`   |
//! | 24     | 8    | `w`   |
//! | 32     | 8    | `val` |
//! | 40     | 1    | `pos` |
//!
//! The output buffer is part of the state: a restored generator continues
//! mid-word exactly where the saved generator left off.
//!
//! # Critical Invariants
//!
//! - **Round-trip**: `from_bytes(to_bytes(r))` produces the same future output as `r`
//! - **No partial restore**: a rejected restore leaves the target untouched

use crate::buffer::OutputBuffer;
use crate::engine::Sfc64;
use crate::error::{RandError, Result};
use crate::rand::Rand;
use serde::{Deserialize, Serialize};

/// Size of the binary state in bytes.
pub const STATE_SIZE: usize = 8 * 4 + 8 + 1;

/// Field-by-field generator state, used for serde checkpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandSnapshot {
    pub a: u64,
    pub b: u64,
    pub c: u64,
    pub w: u64,
    pub val: u64,
    pub pos: i8,
}

impl From<&Rand> for RandSnapshot {
    fn from(rng: &Rand) -> Self {
        let [a, b, c, w] = rng.engine.state();
        RandSnapshot {
            a,
            b,
            c,
            w,
            val: rng.buf.val(),
            pos: rng.buf.pos(),
        }
    }
}

impl From<Rand> for RandSnapshot {
    fn from(rng: Rand) -> Self {
        RandSnapshot::from(&rng)
    }
}

impl TryFrom<RandSnapshot> for Rand {
    type Error = RandError;

    fn try_from(snapshot: RandSnapshot) -> Result<Self> {
        let buf = OutputBuffer::from_parts(snapshot.val, snapshot.pos)
            .ok_or(RandError::InvalidBufferPosition(snapshot.pos))?;
        Ok(Rand {
            engine: Sfc64::from_state(snapshot.a, snapshot.b, snapshot.c, snapshot.w),
            buf,
        })
    }
}

fn read_u64(data: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}

impl RandSnapshot {
    pub fn to_bytes(&self) -> [u8; STATE_SIZE] {
        let mut data = [0u8; STATE_SIZE];
        for (i, word) in [self.a, self.b, self.c, self.w, self.val].iter().enumerate() {
            data[i * 8..i * 8 + 8].copy_from_slice(&word.to_le_bytes());
        }
        data[40] = self.pos as u8;
        data
    }

    /// Decode the first [`STATE_SIZE`] bytes of `data`; trailing bytes are ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < STATE_SIZE {
            return Err(RandError::UnexpectedEof {
                needed: STATE_SIZE,
                got: data.len(),
            });
        }
        Ok(RandSnapshot {
            a: read_u64(data, 0),
            b: read_u64(data, 8),
            c: read_u64(data, 16),
            w: read_u64(data, 24),
            val: read_u64(data, 32),
            pos: data[40] as i8,
        })
    }
}

impl Rand {
    /// Binary representation of the full generator state.
    ///
    /// # Example
    /// ```
    /// use sfc_rand::Rand;
    ///
    /// let mut rng = Rand::with_seed(12345);
    /// rng.next_u32();
    ///
    /// let mut restored = Rand::from_bytes(&rng.to_bytes()).unwrap();
    /// assert_eq!(restored.next_u32(), rng.next_u32());
    /// ```
    pub fn to_bytes(&self) -> [u8; STATE_SIZE] {
        RandSnapshot::from(self).to_bytes()
    }

    /// Generator restored from [`Rand::to_bytes`] output.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let rng = RandSnapshot::from_bytes(data).and_then(Rand::try_from);
        match &rng {
            Ok(_) => {
                rand_trace!("restored generator state");
            }
            Err(err) => {
                rand_debug!("rejected generator state: {}", err);
            }
        }
        rng
    }

    /// Overwrite this generator's state with `data`.
    ///
    /// On error `self` is left unchanged.
    pub fn restore(&mut self, data: &[u8]) -> Result<()> {
        *self = Rand::from_bytes(data)?;
        Ok(())
    }

    /// Field-by-field snapshot of the current state.
    pub fn snapshot(&self) -> RandSnapshot {
        RandSnapshot::from(self)
    }
}
