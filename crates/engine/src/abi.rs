//! The native engine call table.
//!
//! Five synchronous, address-based entry points, mirroring the engine's
//! exported surface: an allocator pair plus init/update/final/cleanup for
//! the hashing context. All cryptographic state lives behind the opaque
//! context handle; the bridge never inspects it.

use std::ffi::c_void;

/// Opaque reference to a native hashing context.
///
/// Only ever produced by the engine's `init` entry and consumed by the
/// other entries. Holding one does not keep anything alive: the engine
/// releases the context only on `cleanup`.
pub type ContextHandle = *mut c_void;

/// The five-entry call table exported by a native hash engine.
///
/// All entries are synchronous. The `update` entry is driven by **bit
/// length**, not byte length; callers always supply a whole number of
/// bytes, so the value passed is `8 * bytes`.
#[derive(Debug, Clone, Copy)]
pub struct EngineVtable {
    /// Allocate `len` bytes in the engine's memory space. Returns null on
    /// failure.
    pub allocate: unsafe extern "C" fn(len: usize) -> *mut u8,
    /// Release a buffer previously returned by `allocate`. Whether a double
    /// free is tolerated is up to the engine.
    pub free: unsafe extern "C" fn(ptr: *mut u8),
    /// Create a hashing context sized for `digest_size_bits`.
    pub init: unsafe extern "C" fn(digest_size_bits: u32) -> ContextHandle,
    /// Feed `bit_len / 8` bytes at `data` into the context. `bit_len` must
    /// equal 8 times the number of bytes actually written at `data`.
    pub update: unsafe extern "C" fn(ctx: ContextHandle, data: *const u8, bit_len: u64),
    /// Write exactly `digest_size_bits / 8` bytes of digest at `out`.
    pub finalize: unsafe extern "C" fn(ctx: ContextHandle, out: *mut u8),
    /// Release all internal state for the context.
    pub cleanup: unsafe extern "C" fn(ctx: ContextHandle),
}

/// A bound native engine.
///
/// Construction asserts that the vtable honors the engine contract; after
/// that, entries without pointer parameters are safe to call, while the
/// pointer-consuming entries remain `unsafe` with per-call requirements.
///
/// The engine's allocator and context table are process-global mutable
/// state and the call table is not re-entrant across threads without
/// external serialization; the session layer upholds this by keeping each
/// session single-owner.
#[derive(Debug, Clone, Copy)]
pub struct Engine {
    vtable: EngineVtable,
}

impl Engine {
    /// Wrap a call table.
    ///
    /// # Safety
    ///
    /// The caller asserts that every entry implements the documented engine
    /// contract: `allocate` returns null or a pointer valid for `len`
    /// bytes, `free` releases only what `allocate` returned, `init` returns
    /// a context usable with the remaining entries, `finalize` writes
    /// exactly `digest_size_bits / 8` bytes, and `cleanup` releases the
    /// context. A vtable that violates this can corrupt arbitrary memory
    /// through the safe wrappers below.
    pub unsafe fn new(vtable: EngineVtable) -> Self {
        Self { vtable }
    }

    /// Allocate `len` bytes in the engine's memory space.
    ///
    /// Returns null on allocation failure; the caller is responsible for
    /// pairing a successful allocation with exactly one [`Engine::free`].
    pub fn allocate(&self, len: usize) -> *mut u8 {
        // Contract asserted at construction; no pointer inputs.
        unsafe { (self.vtable.allocate)(len) }
    }

    /// Release a native buffer.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by [`Engine::allocate`] on this engine
    /// and not yet freed.
    pub unsafe fn free(&self, ptr: *mut u8) {
        (self.vtable.free)(ptr)
    }

    /// Create a hashing context for the given digest size.
    ///
    /// The digest size is forwarded unvalidated; see the session layer for
    /// the documented looseness around non-multiple-of-8 values.
    pub fn init(&self, digest_size_bits: u32) -> ContextHandle {
        unsafe { (self.vtable.init)(digest_size_bits) }
    }

    /// Feed bytes into a context, by bit length.
    ///
    /// # Safety
    ///
    /// `ctx` must come from [`Engine::init`] on this engine and not have
    /// been cleaned up; `data` must be valid for reads of `bit_len / 8`
    /// bytes for the duration of the call.
    pub unsafe fn update(&self, ctx: ContextHandle, data: *const u8, bit_len: u64) {
        (self.vtable.update)(ctx, data, bit_len)
    }

    /// Write the digest for a context into `out`.
    ///
    /// # Safety
    ///
    /// `ctx` must come from [`Engine::init`] on this engine and not have
    /// been cleaned up; `out` must be valid for writes of
    /// `digest_size_bits / 8` bytes, where `digest_size_bits` is the value
    /// the context was initialized with.
    pub unsafe fn finalize(&self, ctx: ContextHandle, out: *mut u8) {
        (self.vtable.finalize)(ctx, out)
    }

    /// Release all engine-side state for a context.
    ///
    /// # Safety
    ///
    /// `ctx` must come from [`Engine::init`] on this engine and must not be
    /// used again afterwards. Calling this twice on the same context is
    /// engine-defined.
    pub unsafe fn cleanup(&self, ctx: ContextHandle) {
        (self.vtable.cleanup)(ctx)
    }
}
