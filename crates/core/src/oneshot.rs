//! One-shot digest helpers.
//!
//! These compose normalize -> init -> one update -> finalize -> cleanup in
//! that fixed order, with cleanup structured to run even when update or
//! finalize fails. The lower-level [`crate::session::Session`] API does not
//! enforce cleanup; these helpers remove the possibility of forgetting it
//! and are the recommended entry point for non-streaming use.

use hashbridge_common::encoding::to_hex;
use hashbridge_common::error::BridgeResult;
use hashbridge_common::input::HashInput;

use crate::session::Session;

/// Hash a value (bytes or text) in one call and return the raw digest.
///
/// `digest_size_bits` defaults to 512 when omitted. The returned vector has
/// exactly `digest_size_bits / 8` bytes and owns its storage.
pub fn digest<'a, I: Into<HashInput<'a>>>(
    input: I,
    digest_size_bits: Option<u32>,
) -> BridgeResult<Vec<u8>> {
    let bytes = input.into().into_bytes();

    let mut session = Session::init(digest_size_bits)?;
    let updated = session.update(&bytes);
    let outcome = updated.and_then(|()| session.finalize());
    // Cleanup runs whether or not update/finalize succeeded.
    session.cleanup();
    outcome
}

/// Hash a value in one call and return the lowercase hex digest.
///
/// The returned string has exactly `digest_size_bits / 4` characters.
pub fn digest_hex<'a, I: Into<HashInput<'a>>>(
    input: I,
    digest_size_bits: Option<u32>,
) -> BridgeResult<String> {
    Ok(to_hex(&digest(input, digest_size_bits)?))
}
