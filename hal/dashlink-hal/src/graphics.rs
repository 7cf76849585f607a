//! Graphics library abstraction
//!
//! Covers the part of an LVGL-style retained-mode renderer that a display
//! driver has to talk to: library init, the tick source, display creation,
//! draw buffer registration and the flush-ready handshake.

/// Millisecond tick source for the library's internal timing
pub type TickSource = fn() -> u32;

/// How the library fills the registered draw buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderMode {
    /// Buffers hold a fraction of the frame; dirty areas are streamed in chunks
    Partial,
    /// Buffers are screen sized; only dirty areas are redrawn in place
    Direct,
    /// Buffers are screen sized; the whole frame is redrawn every time
    Full,
}

/// Draw buffer geometry handed to the library at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferLayout {
    /// Capacity of each buffer in pixels
    pub pixels: usize,
    /// Bytes per pixel in the native colour format
    pub bytes_per_pixel: u8,
    /// Two buffers means the library can render into one while the other flushes
    pub double_buffered: bool,
    /// Render mode
    pub mode: RenderMode,
}

impl BufferLayout {
    /// Capacity of each buffer in bytes
    pub const fn bytes(&self) -> usize {
        self.pixels.saturating_mul(self.bytes_per_pixel as usize)
    }
}

/// A draw buffer as the library sees it: start address and size in bytes
///
/// C libraries keep a raw pointer to each registered buffer and render
/// into it until the display is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferRegion {
    pub addr: usize,
    pub len: usize,
}

impl BufferRegion {
    /// Region covering `buf`
    pub fn of(buf: &[u8]) -> Self {
        Self {
            addr: buf.as_ptr() as usize,
            len: buf.len(),
        }
    }

    /// Whether `pixels` lies entirely inside this region
    pub fn contains(&self, pixels: &[u8]) -> bool {
        let start = pixels.as_ptr() as usize;
        start >= self.addr && start + pixels.len() <= self.addr + self.len
    }
}

/// Rectangular area in display coordinates
///
/// Bounds are inclusive on both axes, so a single pixel at the origin is
/// `Area::new(0, 0, 0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Area {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
}

impl Area {
    /// Create an area from its inclusive corners
    pub const fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Area covering a whole `width` x `height` screen
    pub const fn full(width: u16, height: u16) -> Self {
        Self::new(
            0,
            0,
            width.saturating_sub(1),
            height.saturating_sub(1),
        )
    }

    /// Width in pixels (0 for an inverted area)
    pub const fn width(&self) -> u32 {
        if self.x2 < self.x1 {
            0
        } else {
            (self.x2 - self.x1) as u32 + 1
        }
    }

    /// Height in pixels (0 for an inverted area)
    pub const fn height(&self) -> u32 {
        if self.y2 < self.y1 {
            0
        } else {
            (self.y2 - self.y1) as u32 + 1
        }
    }

    /// Number of pixels covered
    pub const fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Clip against a `width` x `height` screen
    ///
    /// Returns `None` when nothing of the area is on screen.
    pub fn clip(&self, width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 || self.x1 >= width || self.y1 >= height {
            return None;
        }
        let clipped = Self::new(
            self.x1,
            self.y1,
            self.x2.min(width - 1),
            self.y2.min(height - 1),
        );
        (clipped.pixel_count() > 0).then_some(clipped)
    }
}

/// Graphics library display registration and flush handshake
///
/// A display handle is whatever the library uses to identify a display
/// (a pointer in C libraries, an index in a mock).
pub trait GraphicsBackend {
    /// Handle to a display registered with the library
    type Display: Copy + PartialEq + core::fmt::Debug;

    /// Initialize the library's internal state
    fn init(&mut self);

    /// Install the millisecond tick source
    fn set_tick_source(&mut self, source: TickSource);

    /// Create a display of the given resolution
    ///
    /// Returns `None` if the library could not allocate the descriptor.
    fn create_display(&mut self, width: u16, height: u16) -> Option<Self::Display>;

    /// Register the two draw buffers for `display`
    ///
    /// The library renders into `first` and `second` alternately; a
    /// buffer handed to the flush handler is not rendered into again
    /// until [`flush_ready`](Self::flush_ready) is called.
    fn set_buffers(
        &mut self,
        display: Self::Display,
        first: BufferRegion,
        second: BufferRegion,
        layout: BufferLayout,
    );

    /// Set the logical resolution
    fn set_resolution(&mut self, display: Self::Display, width: u16, height: u16);

    /// Set the physical resolution of the panel
    fn set_physical_resolution(&mut self, display: Self::Display, width: u16, height: u16);

    /// Route rendered areas of `display` to the flush handler
    fn enable_flush(&mut self, display: Self::Display);

    /// Tell the library the buffer it last flushed may be reused
    fn flush_ready(&mut self, display: Self::Display);
}
