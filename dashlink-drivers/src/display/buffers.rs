//! Draw buffers
//!
//! Two equally sized regions of DMA-capable memory. While the panel
//! consumes one, the graphics library can render into the other.

use dashlink_core::config::{DisplayConfig, DMA_ALIGN};
use dashlink_hal::graphics::BufferRegion;
use dashlink_hal::DmaAllocator;

/// Which of the two draw buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    /// The other buffer
    pub const fn other(self) -> Self {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }
}

/// Pair of draw buffers owned by the pipeline
pub struct DrawBuffers {
    first: &'static mut [u8],
    second: &'static mut [u8],
}

impl DrawBuffers {
    /// Pair up two allocation results
    ///
    /// Returns `None` unless both allocations succeeded.
    pub fn new(
        first: Option<&'static mut [u8]>,
        second: Option<&'static mut [u8]>,
    ) -> Option<Self> {
        Some(Self {
            first: first?,
            second: second?,
        })
    }

    /// Usable size of each buffer in bytes
    ///
    /// If the two differ, the smaller one bounds both.
    pub fn len(&self) -> usize {
        self.first.len().min(self.second.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, slot: Slot) -> &[u8] {
        match slot {
            Slot::First => &*self.first,
            Slot::Second => &*self.second,
        }
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut [u8] {
        match slot {
            Slot::First => &mut *self.first,
            Slot::Second => &mut *self.second,
        }
    }

    /// Address and size of one buffer, for registration with the library
    pub fn region(&self, slot: Slot) -> BufferRegion {
        BufferRegion::of(self.get(slot))
    }
}

/// Allocate both draw buffers for `config`
///
/// Each result is independent; the pipeline decides what a missing
/// buffer means.
pub fn allocate_draw_buffers<A: DmaAllocator>(
    allocator: &mut A,
    config: &DisplayConfig,
) -> (Option<&'static mut [u8]>, Option<&'static mut [u8]>) {
    let len = config.buffer_bytes();
    let first = allocator.allocate(DMA_ALIGN, len);
    let second = allocator.allocate(DMA_ALIGN, len);
    (first, second)
}
