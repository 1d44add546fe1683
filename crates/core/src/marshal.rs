//! Buffer marshaling between managed byte slices and native engine memory.
//!
//! A [`NativeBuffer`] is a transient (address, length) pair in the engine's
//! memory space. It is owned by the operation that allocated it and is
//! released when the guard drops, so the allocate/free pairing holds on
//! every exit path, including propagated errors. Reads out of native memory
//! always go through [`NativeBuffer::read_back`], which copies into an
//! independently owned `Vec<u8>`. The intermediate view never crosses this
//! module's boundary, because the native heap may be reused or freed after
//! the call returns.

use std::ptr;
use std::slice;

use hashbridge_common::error::{BridgeError, BridgeResult};
use hashbridge_engine::Engine;

/// RAII guard over a buffer in the native engine's memory space.
#[derive(Debug)]
pub struct NativeBuffer<'e> {
    engine: &'e Engine,
    ptr: *mut u8,
    len: usize,
}

impl<'e> NativeBuffer<'e> {
    /// Allocate `len` bytes of native memory, uninitialized.
    ///
    /// Fails with [`BridgeError::AllocationFailed`] when the native
    /// allocator returns a null address.
    pub fn alloc(engine: &'e Engine, len: usize) -> BridgeResult<Self> {
        let buffer = engine.allocate(len);
        if buffer.is_null() {
            return Err(BridgeError::AllocationFailed { requested: len });
        }
        Ok(Self { engine, ptr: buffer, len })
    }

    /// Allocate native memory of exactly `bytes.len()` and copy `bytes`
    /// into it.
    pub fn copy_from(engine: &'e Engine, bytes: &[u8]) -> BridgeResult<Self> {
        let buffer = Self::alloc(engine, bytes.len())?;
        if !bytes.is_empty() {
            // Destination was just allocated with this length and cannot
            // alias a borrowed slice on the managed side.
            unsafe { ptr::copy_nonoverlapping(bytes.as_ptr(), buffer.ptr, bytes.len()) };
        }
        Ok(buffer)
    }

    /// Native address of the buffer.
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer has zero length.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copy the buffer contents into an independently owned byte vector.
    ///
    /// The returned bytes share no storage with native memory and are safe
    /// to retain indefinitely.
    pub fn read_back(&self) -> Vec<u8> {
        if self.len == 0 {
            return Vec::new();
        }
        // View over native memory; copied before it can escape.
        let view = unsafe { slice::from_raw_parts(self.ptr, self.len) };
        view.to_vec()
    }
}

impl Drop for NativeBuffer<'_> {
    fn drop(&mut self) {
        // Pointer came from this engine's allocator and is released exactly
        // once, here.
        unsafe { self.engine.free(self.ptr) };
    }
}
