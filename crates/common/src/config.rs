//! Digest session configuration.

use serde::{Deserialize, Serialize};

/// Digest size used wherever the caller omits one, in bits.
pub const DEFAULT_DIGEST_SIZE_BITS: u32 = 512;

/// Configuration for a hashing session.
///
/// `digest_size_bits` is forwarded to the native engine without bounds
/// checking: values that are not positive multiples of 8 produce whatever
/// failure or digest length the engine produces. This mirrors the engine's
/// own leniency and is intentional; see DESIGN.md.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Number of bits in the digest. Should be a positive multiple of 8.
    pub digest_size_bits: u32,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self { digest_size_bits: DEFAULT_DIGEST_SIZE_BITS }
    }
}

impl DigestConfig {
    /// Create a config with an explicit digest size in bits.
    pub fn new(digest_size_bits: u32) -> Self {
        Self { digest_size_bits }
    }

    /// Digest length in bytes.
    pub fn digest_size_bytes(&self) -> usize {
        (self.digest_size_bits / 8) as usize
    }
}
