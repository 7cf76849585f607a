//! DMA-capable memory
//!
//! Draw buffers must live in memory the LCD peripheral can DMA from. On
//! the ESP32-S3 that means internal SRAM (or PSRAM with cache-line
//! alignment), so allocations carry an explicit alignment.

/// Allocator for DMA-capable regions that live for the rest of the program
pub trait DmaAllocator {
    /// Allocate `len` bytes aligned to `align`
    ///
    /// Returns `None` if the request cannot be satisfied. `align` must be
    /// a power of two.
    fn allocate(&mut self, align: usize, len: usize) -> Option<&'static mut [u8]>;
}

/// Bump allocator over a `'static` arena
///
/// Typically the arena is a `StaticCell<[u8; N]>` placed in a DMA-capable
/// section. Regions are never returned to the pool.
pub struct StaticPool {
    arena: &'static mut [u8],
}

impl StaticPool {
    /// Wrap an arena
    pub fn new(arena: &'static mut [u8]) -> Self {
        Self { arena }
    }

    /// Bytes left in the arena (ignoring alignment padding)
    pub fn remaining(&self) -> usize {
        self.arena.len()
    }
}

impl DmaAllocator for StaticPool {
    fn allocate(&mut self, align: usize, len: usize) -> Option<&'static mut [u8]> {
        if !align.is_power_of_two() {
            return None;
        }

        let addr = self.arena.as_ptr() as usize;
        let pad = addr.wrapping_neg() & (align - 1);
        if pad.checked_add(len)? > self.arena.len() {
            return None;
        }

        let arena = core::mem::take(&mut self.arena);
        let (_, rest) = arena.split_at_mut(pad);
        let (block, rest) = rest.split_at_mut(len);
        self.arena = rest;
        Some(block)
    }
}
