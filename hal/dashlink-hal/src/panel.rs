//! LCD panel abstraction
//!
//! The panel driver (ST7701 over RGB on the reference board) is vendor
//! code; the flush pipeline only needs its windowed-write primitive.

/// Windowed pixel write
pub trait PanelWindow {
    /// Error reported by the panel driver
    type Error: core::fmt::Debug;

    /// Copy `pixels` into the window `[x_start, x_end] x [y_start, y_end]`
    ///
    /// Bounds are inclusive. `pixels` holds the window row by row in the
    /// panel's native colour format.
    fn add_window(
        &mut self,
        x_start: u16,
        x_end: u16,
        y_start: u16,
        y_end: u16,
        pixels: &[u8],
    ) -> Result<(), Self::Error>;
}
