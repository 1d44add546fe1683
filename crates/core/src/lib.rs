//! # Hashbridge Core
//!
//! Streaming message-digest sessions over a native hash engine that is
//! reachable only through a pointer-and-length call table.
//!
//! The native side allocates manually and never reclaims automatically; the
//! Rust side is borrow-checked and copy-on-read. This crate reconciles the
//! two: every native buffer is paired with exactly one release on every
//! exit path, and every byte sequence handed back to callers is an owned
//! copy, never a view over native memory.
//!
//! ## Usage
//!
//! ```
//! use hashbridge_core::{digest_hex, load_builtin};
//!
//! # fn main() -> hashbridge_common::BridgeResult<()> {
//! // One-time engine load; see `ready()` for the awaitable form.
//! let _ = load_builtin();
//!
//! // One-shot hashing with the default 512-bit digest.
//! let hex = digest_hex("hello", None)?;
//! assert_eq!(hex.len(), 128);
//! # Ok(())
//! # }
//! ```
//!
//! Streaming callers drive a [`Session`] directly: `init` -> zero or more
//! `update`s -> `finalize` -> `cleanup`. The lower-level API does not run
//! cleanup automatically; the one-shot [`digest`]/[`digest_hex`] helpers do
//! and are the recommended entry point for non-streaming use.

pub mod marshal;
pub mod oneshot;
pub mod session;

pub use marshal::NativeBuffer;
pub use oneshot::{digest, digest_hex};
pub use session::Session;

// Re-export the public surface of the lower layers so callers need only
// this crate.
pub use hashbridge_common::{
    to_hex, BridgeError, BridgeResult, DigestConfig, HashInput, DEFAULT_DIGEST_SIZE_BITS,
};
pub use hashbridge_engine::{engine, is_ready, load_builtin, ready};
