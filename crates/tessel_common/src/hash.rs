//! Fingerprints of generated text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// XXH3-128 fingerprint of a generated file.
///
/// Reported with every run so two outputs can be compared by hash alone.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(u128);

impl ContentHash {
    /// Fingerprints `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        ContentHash(xxhash_rust::xxh3::xxh3_128(data))
    }

    /// First eight hex digits, for summary lines.
    pub fn short(&self) -> String {
        format!("{:08x}", self.0 >> 96)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({}..)", self.short())
    }
}
