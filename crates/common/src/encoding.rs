//! Digest-to-hex encoding.

/// Encode bytes as a lowercase hexadecimal string.
///
/// Each byte maps to exactly two characters (zero-padded for values below
/// 16), so the output length is always `2 * bytes.len()`. Pure function, no
/// engine interaction.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
