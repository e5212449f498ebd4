//! 32-bit FNV-1a seeds derived from ticker strings.
//!
//! Hashing runs over UTF-16 code units so that non-ASCII symbols produce the
//! same seed as the dashboard that consumes these numbers.

use serde::{Deserialize, Serialize};

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 16_777_619;

/// Seed for a deterministic stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed(pub u32);

impl Seed {
    /// Hash `key` exactly as given (no case folding).
    pub fn from_key(key: &str) -> Self {
        let mut h = FNV_OFFSET_BASIS;
        for unit in key.encode_utf16() {
            h ^= u32::from(unit);
            h = h.wrapping_mul(FNV_PRIME);
        }
        Seed(h)
    }

    /// Seed of a ticker: the key is upper-cased first.
    pub fn from_ticker(ticker: &str) -> Self {
        Self::from_key(&ticker.to_uppercase())
    }

    /// Raw value.
    pub fn value(self) -> u32 {
        self.0
    }
}
