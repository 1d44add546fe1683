//! Built-in reference engine.
//!
//! Implements the five-entry ABI on top of BLAKE3 extendable output, so any
//! digest size the bridge forwards (256, 512, 1024 bits, ...) yields exactly
//! `digest_size_bits / 8` bytes. The allocator and the context count are
//! process-global, guarded by locks; entries tolerate null contexts and
//! null data pointers as no-ops, and `free` is idempotent (unknown and
//! already-released addresses are ignored).
//!
//! The accounting hooks ([`outstanding_buffers`], [`outstanding_contexts`])
//! expose the registry sizes so tests can verify that every allocation and
//! every context is paired with exactly one release.

use std::alloc::{self, Layout};
use std::collections::HashMap;
use std::ffi::c_void;
use std::ptr;
use std::slice;
use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::abi::{ContextHandle, EngineVtable};

/// Live buffer registry: address -> layout used to allocate it.
static ALLOCATIONS: Lazy<Mutex<HashMap<usize, Layout>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Number of hashing contexts created and not yet cleaned up.
static CONTEXTS: AtomicUsize = AtomicUsize::new(0);

struct HashState {
    digest_size_bits: u32,
    hasher: blake3::Hasher,
}

/// Number of native buffers currently allocated and not yet freed.
pub fn outstanding_buffers() -> usize {
    ALLOCATIONS.lock().len()
}

/// Number of hashing contexts currently alive.
pub fn outstanding_contexts() -> usize {
    CONTEXTS.load(Ordering::SeqCst)
}

/// The reference engine's call table.
pub fn vtable() -> EngineVtable {
    EngineVtable {
        allocate: builtin_allocate,
        free: builtin_free,
        init: builtin_init,
        update: builtin_update,
        finalize: builtin_finalize,
        cleanup: builtin_cleanup,
    }
}

unsafe extern "C" fn builtin_allocate(len: usize) -> *mut u8 {
    // Zero-byte requests still get a distinct, freeable address.
    let Ok(layout) = Layout::from_size_align(len.max(1), 1) else {
        return ptr::null_mut();
    };
    let buffer = alloc::alloc(layout);
    if buffer.is_null() {
        return ptr::null_mut();
    }
    ALLOCATIONS.lock().insert(buffer as usize, layout);
    buffer
}

unsafe extern "C" fn builtin_free(buffer: *mut u8) {
    if buffer.is_null() {
        return;
    }
    if let Some(layout) = ALLOCATIONS.lock().remove(&(buffer as usize)) {
        alloc::dealloc(buffer, layout);
    }
}

unsafe extern "C" fn builtin_init(digest_size_bits: u32) -> ContextHandle {
    let state = Box::new(HashState { digest_size_bits, hasher: blake3::Hasher::new() });
    CONTEXTS.fetch_add(1, Ordering::SeqCst);
    Box::into_raw(state) as ContextHandle
}

unsafe extern "C" fn builtin_update(ctx: ContextHandle, data: *const u8, bit_len: u64) {
    if ctx.is_null() || data.is_null() {
        return;
    }
    let state = &mut *(ctx as *mut HashState);
    let len = (bit_len / 8) as usize;
    if len > 0 {
        state.hasher.update(slice::from_raw_parts(data, len));
    }
}

unsafe extern "C" fn builtin_finalize(ctx: ContextHandle, out: *mut u8) {
    if ctx.is_null() || out.is_null() {
        return;
    }
    let state = &*(ctx as *mut HashState);
    let len = (state.digest_size_bits / 8) as usize;
    if len > 0 {
        state.hasher.finalize_xof().fill(slice::from_raw_parts_mut(out, len));
    }
}

unsafe extern "C" fn builtin_cleanup(ctx: ContextHandle) {
    if ctx.is_null() {
        return;
    }
    drop(Box::from_raw(ctx as *mut HashState));
    CONTEXTS.fetch_sub(1, Ordering::SeqCst);
}
