//! Memory-access noise source (spec §4.2).
//!
//! Walks a scratch buffer larger than a typical L1 data cache in a fixed
//! stride pattern, forcing a read-modify-write on every visited location so
//! the cache line is dirtied and eviction traffic varies. The *value*
//! written is irrelevant — only the variable latency the caller measures
//! around a call to [`MemoryAccess::touch`] carries entropy.

use std::ptr;

use zeroize::Zeroize;

use crate::consts::{JENT_MEMORY_ACCESSLOOPS, JENT_MEMORY_BLOCKS, JENT_MEMORY_BLOCKSIZE};

/// Scratch region walked by the memory-access noise source.
///
/// A no-op (spec invariant: all other behavior stays valid) when constructed
/// with `enabled: false` — `touch` then does nothing.
pub struct MemoryAccess {
    buf: Option<Vec<u8>>,
    block_size: usize,
    blocks: usize,
    access_loops: usize,
    location: usize,
}

impl MemoryAccess {
    /// Allocate the canonical-size scratch buffer, or none at all if `enabled` is false.
    pub fn new(enabled: bool) -> Self {
        Self {
            buf: enabled.then(|| vec![0u8; JENT_MEMORY_BLOCKSIZE * JENT_MEMORY_BLOCKS]),
            block_size: JENT_MEMORY_BLOCKSIZE,
            blocks: JENT_MEMORY_BLOCKS,
            access_loops: JENT_MEMORY_ACCESSLOOPS,
            location: 0,
        }
    }

    /// Whether this source is backed by a scratch buffer.
    pub fn is_enabled(&self) -> bool {
        self.buf.is_some()
    }

    /// Current rolling index into the buffer (for the wrap-discipline invariant).
    pub fn location(&self) -> usize {
        self.location
    }

    /// Perform one invocation's worth of reads/writes (spec §4.2).
    ///
    /// No-op if no buffer was allocated.
    pub fn touch(&mut self) {
        let Some(buf) = self.buf.as_mut() else {
            return;
        };
        let modulus = self.block_size * self.blocks;
        for _ in 0..self.access_loops {
            // SAFETY: `location` is always kept < buf.len() == modulus by the
            // invariant maintained below, so the offset is in-bounds.
            unsafe {
                let ptr = buf.as_mut_ptr().add(self.location);
                let current = ptr::read_volatile(ptr);
                ptr::write_volatile(ptr, current.wrapping_add(1));
            }
            self.location = (self.location + self.block_size - 1) % modulus;
        }
    }
}

impl Drop for MemoryAccess {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.as_mut() {
            buf.zeroize();
        }
    }
}
