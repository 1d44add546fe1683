//! Shared foundation for the hashbridge crates.
//!
//! This crate holds everything the engine binding and the session layer
//! have in common and that never touches native memory:
//!
//! - [`error`]: the bridge-wide error taxonomy and classification
//! - [`input`]: normalization of caller input (bytes or text) into bytes
//! - [`encoding`]: digest-to-hex encoding
//! - [`config`]: digest session configuration
//!
//! Nothing in this crate is `unsafe`; the FFI seams live in
//! `hashbridge-engine` and `hashbridge-core`.

#![forbid(unsafe_code)]

pub mod config;
pub mod encoding;
pub mod error;
pub mod input;

// Re-export commonly used types for convenience
pub use config::{DigestConfig, DEFAULT_DIGEST_SIZE_BITS};
pub use encoding::to_hex;
pub use error::{BridgeError, BridgeResult, ErrorClassification, ErrorSeverity};
pub use input::HashInput;
