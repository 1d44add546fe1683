//! Hashing session lifecycle: init -> update* -> finalize -> cleanup.
//!
//! A session owns one native hashing context and drives the engine protocol
//! in the exact order the caller issues calls; digests are order-sensitive
//! and no reordering or batching happens here. Sessions are single-owner:
//! the context handle makes `Session` `!Send`, so a session cannot migrate
//! between threads, and the engine's call table is never entered
//! concurrently through one session.
//!
//! The protocol is *not* defensively validated. Updating after
//! [`Session::finalize`], or finalizing twice, is forwarded to the engine
//! and produces whatever the engine does: a documented misuse inherited
//! from the engine contract, not detected here. The one state this layer
//! does make unrepresentable is double cleanup: [`Session::cleanup`]
//! consumes the session.
//!
//! Cleanup is explicit. A session that was successfully initialized leaks
//! native memory permanently unless [`Session::cleanup`] runs, on every
//! code path, including after an update or finalize error. Non-streaming
//! callers should prefer the one-shot helpers in [`crate::oneshot`], which
//! guarantee this structurally.

use hashbridge_common::config::{DigestConfig, DEFAULT_DIGEST_SIZE_BITS};
use hashbridge_common::error::BridgeResult;
use hashbridge_common::input::HashInput;
use hashbridge_engine::{gate, ContextHandle, Engine};
use tracing::{debug, trace};

use crate::marshal::NativeBuffer;

/// An in-progress hash computation over one native context.
#[derive(Debug)]
pub struct Session {
    digest_size_bits: u32,
    context: ContextHandle,
    engine: &'static Engine,
}

impl Session {
    /// Open a hashing session.
    ///
    /// Fails fast with `EngineNotReady` before any native call if the
    /// engine has not finished loading. `digest_size_bits` defaults to 512
    /// when omitted and is otherwise forwarded to the engine unvalidated:
    /// values that are not positive multiples of 8 produce whatever failure
    /// or digest length the engine produces.
    pub fn init(digest_size_bits: Option<u32>) -> BridgeResult<Self> {
        let engine = gate::engine()?;
        let bits = digest_size_bits.unwrap_or(DEFAULT_DIGEST_SIZE_BITS);
        let context = engine.init(bits);
        debug!(digest_size_bits = bits, "hash session initialized");
        Ok(Self { digest_size_bits: bits, context, engine })
    }

    /// Open a hashing session from a [`DigestConfig`].
    pub fn with_config(config: &DigestConfig) -> BridgeResult<Self> {
        Self::init(Some(config.digest_size_bits))
    }

    /// Digest size of this session in bits.
    pub fn digest_size_bits(&self) -> u32 {
        self.digest_size_bits
    }

    /// Digest size of this session in bytes.
    pub fn digest_size_bytes(&self) -> usize {
        (self.digest_size_bits / 8) as usize
    }

    /// Feed bytes into the hash computation.
    ///
    /// May be called any number of times; each call's bytes are logically
    /// concatenated, in call order, into the hashed message. The bytes are
    /// marshaled into a fresh native buffer which is released
    /// unconditionally after the engine has consumed it, even though the
    /// native call itself cannot report failure.
    pub fn update(&mut self, bytes: &[u8]) -> BridgeResult<()> {
        let buffer = NativeBuffer::copy_from(self.engine, bytes)?;
        // The engine is driven by bit length, not byte length.
        unsafe { self.engine.update(self.context, buffer.as_ptr(), bytes.len() as u64 * 8) };
        trace!(len = bytes.len(), "session updated");
        Ok(())
    }

    /// Normalize a value (bytes or text) and feed it into the computation.
    pub fn update_from_value<'a, I: Into<HashInput<'a>>>(&mut self, value: I) -> BridgeResult<()> {
        let bytes = value.into().into_bytes();
        self.update(&bytes)
    }

    /// Produce the digest accumulated so far.
    ///
    /// Returns exactly `digest_size_bits / 8` bytes, copied out of native
    /// memory into an independently owned vector before the output buffer
    /// is released. Does **not** release the context: the session remains
    /// valid for inspection, but updating it afterwards is the documented
    /// misuse described at module level.
    pub fn finalize(&self) -> BridgeResult<Vec<u8>> {
        let out = NativeBuffer::alloc(self.engine, self.digest_size_bytes())?;
        unsafe { self.engine.finalize(self.context, out.as_ptr()) };
        let digest = out.read_back();
        debug!(digest_len = digest.len(), "hash session finalized");
        Ok(digest)
    }

    /// Release the native context, ending the session.
    ///
    /// Must be called exactly once per successfully initialized session, on
    /// every code path; consuming `self` makes a second call
    /// unrepresentable. Infallible: the engine's cleanup entry cannot
    /// report failure.
    pub fn cleanup(self) {
        unsafe { self.engine.cleanup(self.context) };
        debug!("hash session cleaned up");
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the session protocol against the reference engine.

    use hashbridge_engine::load_builtin;

    use super::*;

    fn ensure_engine() {
        let _ = load_builtin();
    }

    /// Validates `Session::init` defaults.
    ///
    /// Assertions:
    /// - Confirms the default digest size is 512 bits / 64 bytes.
    /// - Confirms an explicit size is used as supplied.
    #[test]
    fn test_init_defaults_to_512_bits() {
        ensure_engine();

        let session = Session::init(None).unwrap();
        assert_eq!(session.digest_size_bits(), 512);
        assert_eq!(session.digest_size_bytes(), 64);
        session.cleanup();

        let session = Session::init(Some(256)).unwrap();
        assert_eq!(session.digest_size_bytes(), 32);
        session.cleanup();
    }

    /// Validates `Session::with_config` against the equivalent `init`.
    #[test]
    fn test_with_config_matches_init() {
        ensure_engine();

        let config = DigestConfig::new(256);
        let mut a = Session::with_config(&config).unwrap();
        let mut b = Session::init(Some(256)).unwrap();
        a.update(b"abc").unwrap();
        b.update(b"abc").unwrap();
        let da = a.finalize().unwrap();
        let db = b.finalize().unwrap();
        a.cleanup();
        b.cleanup();
        assert_eq!(da, db);
    }

    /// Validates that `update_from_value` with text equals updating with
    /// the UTF-8 bytes of the same text.
    #[test]
    fn test_update_from_value_text_equals_bytes() {
        ensure_engine();

        let mut text = Session::init(None).unwrap();
        text.update_from_value("abc").unwrap();
        let text_digest = text.finalize().unwrap();
        text.cleanup();

        let mut bytes = Session::init(None).unwrap();
        bytes.update(b"abc").unwrap();
        let bytes_digest = bytes.finalize().unwrap();
        bytes.cleanup();

        assert_eq!(text_digest, bytes_digest);
    }

    /// Validates that finalize does not invalidate the session: cleanup
    /// still runs afterwards, and a session with zero updates produces a
    /// digest of the right length.
    #[test]
    fn test_finalize_then_cleanup_with_no_updates() {
        ensure_engine();

        let session = Session::init(Some(256)).unwrap();
        let digest = session.finalize().unwrap();
        assert_eq!(digest.len(), 32);
        session.cleanup();
    }
}
