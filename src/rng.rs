//! Splittable random keys.
//!
//! The sampler never holds random state between calls. Instead every sweep and every block
//! update is handed its own key, derived by splitting the key of the enclosing run. Running
//! twice from the same key gives the same chain, and chains started from different split keys
//! share no random stream.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// An immutable key from which independent random streams are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct RngKey(pub u64);

impl RngKey {
    /// Make a key from a seed.
    pub fn new(seed: u64) -> Self {
        RngKey(seed)
    }

    /// Split into `n` keys. Splitting into a single key returns the key itself.
    pub fn split(self, n: usize) -> Vec<RngKey> {
        match n {
            0 => Vec::new(),
            1 => vec![self],
            _ => {
                let mut rng = ChaCha8Rng::seed_from_u64(self.0);
                (0..n).map(|_| RngKey(rng.next_u64())).collect()
            }
        }
    }

    /// Split into exactly two keys.
    pub fn split_two(self) -> (RngKey, RngKey) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.0);
        (RngKey(rng.next_u64()), RngKey(rng.next_u64()))
    }

    /// A fresh random stream for this key.
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.0)
    }

    /// The seed value.
    pub fn seed(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RngKey {
    fn from(seed: u64) -> Self {
        RngKey(seed)
    }
}
