//! Display registration and flush handshake
//!
//! The graphics library renders a dirty area into one of the two draw
//! buffers and hands it to [`flush_area`]. The area goes to the panel's
//! windowed write, then the library is told the buffer is free again.
//! The library never touches a buffer between those two points, so each
//! area is strictly produced, written out, then released.

use dashlink_core::config::DisplayConfig;
use dashlink_hal::graphics::{Area, GraphicsBackend, TickSource};
use dashlink_hal::PanelWindow;

use super::buffers::{DrawBuffers, Slot};
use super::DisplayError;

/// Write one rendered area to the panel and release its buffer
///
/// `pixels` reaches the panel untouched, with the area's inclusive bounds.
/// Flush-ready is signalled exactly once, even when the panel write fails;
/// the failure is then logged and returned.
pub fn flush_area<G, P>(
    gfx: &mut G,
    panel: &mut P,
    display: G::Display,
    area: &Area,
    pixels: &[u8],
) -> Result<(), DisplayError>
where
    G: GraphicsBackend,
    P: PanelWindow,
{
    let written = panel.add_window(area.x1, area.x2, area.y1, area.y2, pixels);
    gfx.flush_ready(display);

    written.map_err(|_| {
        warn!(
            "Panel write failed for area ({}, {})-({}, {})",
            area.x1,
            area.y1,
            area.x2,
            area.y2
        );
        DisplayError::Panel
    })
}

/// Double-buffered partial-render display
pub struct DisplayPipeline<G: GraphicsBackend, P> {
    gfx: G,
    panel: P,
    config: DisplayConfig,
    buffers: Option<DrawBuffers>,
    display: Option<G::Display>,
    next: Slot,
}

impl<G: GraphicsBackend, P: PanelWindow> DisplayPipeline<G, P> {
    /// Create an uninitialized pipeline
    pub fn new(gfx: G, panel: P, config: DisplayConfig) -> Self {
        Self {
            gfx,
            panel,
            config,
            buffers: None,
            display: None,
            next: Slot::First,
        }
    }

    /// Bring up the graphics library and register the display
    ///
    /// `first` and `second` are the results of allocating the draw
    /// buffers; both are registered with the library for double-buffered
    /// partial rendering. If either is missing (or too small) the library
    /// is left initialized but no display is created and no flush handler
    /// is registered.
    pub fn init(
        &mut self,
        first: Option<&'static mut [u8]>,
        second: Option<&'static mut [u8]>,
        tick: TickSource,
    ) -> Result<G::Display, DisplayError> {
        if self.display.is_some() {
            warn!("Display already initialized");
            return Err(DisplayError::AlreadyInitialized);
        }

        self.gfx.init();
        self.gfx.set_tick_source(tick);

        let Some(buffers) = DrawBuffers::new(first, second) else {
            error!("Draw buffer allocation failed");
            return Err(DisplayError::BufferAllocation);
        };

        let required = self.config.buffer_bytes();
        if buffers.len() < required {
            error!(
                "Draw buffers too small: {} of {} bytes",
                buffers.len(),
                required
            );
            return Err(DisplayError::BufferTooSmall {
                required,
                actual: buffers.len(),
            });
        }

        let (width, height) = (self.config.width, self.config.height);
        let Some(display) = self.gfx.create_display(width, height) else {
            error!("Graphics library refused to create a {}x{} display", width, height);
            return Err(DisplayError::NoDisplay);
        };

        self.gfx.set_buffers(
            display,
            buffers.region(Slot::First),
            buffers.region(Slot::Second),
            self.config.buffer_layout(),
        );
        self.gfx.set_resolution(display, width, height);
        self.gfx.set_physical_resolution(display, width, height);
        self.gfx.enable_flush(display);

        self.buffers = Some(buffers);
        self.display = Some(display);

        info!(
            "Display {}x{} ready, 2 x {} byte draw buffers",
            width,
            height,
            required
        );
        Ok(display)
    }

    /// Flush handler for areas rendered by the graphics library
    pub fn flush(
        &mut self,
        display: G::Display,
        area: &Area,
        pixels: &[u8],
    ) -> Result<(), DisplayError> {
        flush_area(&mut self.gfx, &mut self.panel, display, area, pixels)
    }

    /// Render `area` through the draw buffers in partial mode
    ///
    /// The area is clipped to the screen and cut into full-width row bands
    /// that fit one buffer. Bands alternate between the two buffers; each
    /// is filled by `draw` and flushed before the next one starts. Returns
    /// the number of flushes, or the first panel error once the whole area
    /// has been streamed.
    pub fn render<F>(&mut self, area: Area, mut draw: F) -> Result<usize, DisplayError>
    where
        F: FnMut(&Area, &mut [u8]),
    {
        let (Some(display), Some(buffers)) = (self.display, self.buffers.as_mut()) else {
            return Err(DisplayError::NotInitialized);
        };

        let Some(area) = area.clip(self.config.width, self.config.height) else {
            return Ok(0);
        };

        let bpp = self.config.bytes_per_pixel as usize;
        let row_bytes = area.width() as usize * bpp;
        let rows_per_band = buffers.len() / row_bytes;
        if rows_per_band == 0 {
            return Err(DisplayError::BufferTooSmall {
                required: row_bytes,
                actual: buffers.len(),
            });
        }

        let mut flushes = 0;
        let mut first_error = None;
        let mut y = area.y1 as usize;
        let y_last = area.y2 as usize;

        while y <= y_last {
            let band_last = (y + rows_per_band - 1).min(y_last);
            let band = Area::new(area.x1, y as u16, area.x2, band_last as u16);

            let slot = self.next;
            self.next = slot.other();

            let pixels = &mut buffers.get_mut(slot)[..band.pixel_count() * bpp];
            draw(&band, pixels);
            trace!("Flushing rows {}..={} from {:?}", band.y1, band.y2, slot);

            if let Err(e) = flush_area(&mut self.gfx, &mut self.panel, display, &band, pixels) {
                first_error.get_or_insert(e);
            }
            flushes += 1;
            y = band_last + 1;
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(flushes),
        }
    }

    /// Render the whole screen
    pub fn render_full<F>(&mut self, draw: F) -> Result<usize, DisplayError>
    where
        F: FnMut(&Area, &mut [u8]),
    {
        self.render(Area::full(self.config.width, self.config.height), draw)
    }

    /// Display handle, once `init` has succeeded
    pub fn display(&self) -> Option<G::Display> {
        self.display
    }

    pub fn is_ready(&self) -> bool {
        self.display.is_some()
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn graphics(&self) -> &G {
        &self.gfx
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }
}
