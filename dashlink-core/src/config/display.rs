//! Display configuration
//!
//! Panel geometry plus the draw buffer sizing used in partial render
//! mode: each of the two buffers holds `1 / buffer_factor` of a frame.

use dashlink_hal::graphics::{BufferLayout, RenderMode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Alignment of draw buffers in DMA-capable memory
pub const DMA_ALIGN: usize = 32;

/// Panel and draw buffer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DisplayConfig {
    /// Horizontal resolution in pixels
    pub width: u16,
    /// Vertical resolution in pixels
    pub height: u16,
    /// Bytes per pixel (2 for RGB565)
    pub bytes_per_pixel: u8,
    /// Fraction of a frame each draw buffer holds
    pub buffer_factor: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        // 2.1" round ST7701 panel
        Self {
            width: 480,
            height: 480,
            bytes_per_pixel: 2,
            buffer_factor: 6,
        }
    }
}

impl DisplayConfig {
    /// Pixels in a full frame
    pub const fn frame_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Capacity of one draw buffer in pixels
    pub const fn buffer_pixels(&self) -> usize {
        if self.buffer_factor == 0 {
            0
        } else {
            self.frame_pixels() / self.buffer_factor as usize
        }
    }

    /// Size of a full frame in bytes
    ///
    /// `None` if it does not fit in 32 bits, the address width of the
    /// target.
    pub fn frame_bytes(&self) -> Option<u32> {
        (self.width as u32)
            .checked_mul(self.height as u32)?
            .checked_mul(self.bytes_per_pixel as u32)
    }

    /// Size of one draw buffer in bytes
    pub const fn buffer_bytes(&self) -> usize {
        self.buffer_pixels()
            .saturating_mul(self.bytes_per_pixel as usize)
    }

    /// Layout registered with the graphics library
    pub const fn buffer_layout(&self) -> BufferLayout {
        BufferLayout {
            pixels: self.buffer_pixels(),
            bytes_per_pixel: self.bytes_per_pixel,
            double_buffered: true,
            mode: RenderMode::Partial,
        }
    }
}
