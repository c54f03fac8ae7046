//! sfc-rand - Fast Non-Cryptographic PRNG
//!
//! SFC64 generator with bias-bounded range reduction, buffered sub-word
//! output and exact state serialization.
//!
//! # Architecture
//!
//! - **engine**: SFC64 state transition and seeding
//! - **reduce**: Bounded-range reduction (fixed point, double multiply)
//! - **buffer**: 32-bit and byte extraction from 64-bit draws
//! - **rand**: The `Rand` generator and derived values
//! - **state**: 41-byte binary state format and serde snapshots
//! - **config**: Seeding configuration
//!
//! # Critical Invariants
//!
//! 1. All arithmetic wraps; no draw operation can fail
//! 2. Same seed and same calls produce the same output
//! 3. A bounded draw uses at most two engine steps
//! 4. Serialized state includes buffered output
//!
//! # Example
//! ```
//! use sfc_rand::Rand;
//!
//! let mut rng = Rand::with_seed(42);
//! let mut deck: Vec<u32> = (0..52).collect();
//! rng.shuffle_slice(&mut deck);
//!
//! let saved = rng.to_bytes();
//! let next = rng.f64();
//! assert_eq!(Rand::from_bytes(&saved).unwrap().f64(), next);
//! ```

#[macro_use]
mod macros;

pub mod buffer;
pub mod config;
pub mod engine;
pub mod error;
pub mod rand;
pub mod reduce;
pub mod state;

pub use buffer::OutputBuffer;
pub use config::GeneratorConfig;
pub use engine::Sfc64;
pub use error::{RandError, Result};
pub use rand::Rand;
pub use state::{RandSnapshot, STATE_SIZE};
