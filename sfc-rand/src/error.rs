use thiserror::Error;

/// Errors reported by fallible generator operations
///
/// Invalid arguments to draw operations (non-positive bounds) are programmer
/// errors and panic instead.
#[derive(Debug, Error)]
pub enum RandError {
    #[error("Unexpected end of state data: needed {needed} bytes, got {got}")]
    UnexpectedEof { needed: usize, got: usize },

    #[error("Invalid buffer position {0} in state data (expected 0..=8)")]
    InvalidBufferPosition(i8),

    #[error("Entropy source failed: {0}")]
    Entropy(#[from] rand_core::Error),

    #[error("Invalid generator config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RandError>;
