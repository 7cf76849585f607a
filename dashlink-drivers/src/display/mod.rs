//! Display flush pipeline
//!
//! Bridges the graphics library's rendered areas to the LCD panel:
//!
//! - [`buffers`] - the two DMA draw buffers and their allocation
//! - [`pipeline`] - display registration, the flush handshake and the
//!   partial-render loop

pub mod buffers;
pub mod pipeline;

pub use buffers::{allocate_draw_buffers, DrawBuffers, Slot};
pub use pipeline::{flush_area, DisplayPipeline};

/// Display pipeline errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// One or both draw buffers could not be allocated
    BufferAllocation,
    /// A draw buffer is smaller than the configured size
    BufferTooSmall { required: usize, actual: usize },
    /// The graphics library refused to create the display
    NoDisplay,
    /// The panel driver reported a failed window write
    Panel,
    /// `init` already succeeded
    AlreadyInitialized,
    /// Rendering was requested before a successful `init`
    NotInitialized,
}
