//! Generator configuration
//!
//! Lets callers pick deterministic or entropy seeding from data, e.g. a JSON
//! fragment of a larger application config.

use crate::error::{RandError, Result};
use crate::rand::Rand;
use serde::{Deserialize, Serialize};

/// How to construct a [`Rand`].
///
/// # Example
/// ```
/// use sfc_rand::GeneratorConfig;
///
/// let config = GeneratorConfig::from_json(r#"{ "seed": 42 }"#).unwrap();
/// let mut a = config.build();
/// let mut b = config.build();
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Deterministic seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn deterministic(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RandError::InvalidConfig(e.to_string()))
    }

    pub fn build(&self) -> Rand {
        match self.seed {
            Some(seed) => Rand::with_seed(seed),
            None => Rand::new(),
        }
    }

    /// Like [`GeneratorConfig::build`], but reports entropy failures.
    pub fn try_build(&self) -> Result<Rand> {
        match self.seed {
            Some(seed) => Ok(Rand::with_seed(seed)),
            None => Rand::try_new(),
        }
    }
}
