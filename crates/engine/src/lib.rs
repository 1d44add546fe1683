//! Native hash engine binding for hashbridge.
//!
//! The native engine is an opaque capability reachable only through a
//! five-entry, pointer-and-length call table ([`abi::EngineVtable`]). This
//! crate owns that seam:
//!
//! - [`abi`]: the call table and the [`abi::Engine`] wrapper with per-entry
//!   safety contracts
//! - [`gate`]: the process-wide readiness gate; the engine is bound exactly
//!   once, and every session operation must observe readiness first
//! - [`builtin`]: a reference engine behind the same ABI, backed by BLAKE3
//!   extendable output, used by tests and by embedders that do not supply
//!   their own engine
//!
//! Nothing above this crate may call the engine without going through the
//! gate; an unbound call table is never dereferenced.

pub mod abi;
pub mod builtin;
pub mod gate;

pub use abi::{ContextHandle, Engine, EngineVtable};
pub use gate::{engine, is_ready, load_builtin, ready};
