//! Simulated peripherals for host-side tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use dashlink_core::config::{Filter, I2cConfig};
use dashlink_hal::graphics::{BufferLayout, BufferRegion, GraphicsBackend, TickSource};
use dashlink_hal::{CanBus, DmaAllocator, I2cBus, PanelWindow};
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

/// Register-addressed I2C device with an auto-incrementing pointer
pub struct MockI2cDevice {
    pub address: u8,
    pub registers: [u8; 256],
    pub pointer: u8,
    /// Device ignores every transaction
    pub nack: bool,
    /// Supply this many bytes fewer than requested
    pub short_by: usize,
    /// Bytes scribbled into the read buffer before a short read returns
    pub scribble: u8,
    pub begun: Option<I2cConfig>,
    pub writes: Vec<(u8, Vec<u8>)>,
}

impl MockI2cDevice {
    pub fn new(address: u8) -> Self {
        let mut registers = [0u8; 256];
        for (i, r) in registers.iter_mut().enumerate() {
            *r = (i as u8).wrapping_mul(7).wrapping_add(3);
        }
        Self {
            address,
            registers,
            pointer: 0,
            nack: false,
            short_by: 0,
            scribble: 0xEE,
            begun: None,
            writes: Vec::new(),
        }
    }

    fn check_ack(&self, address: u8) -> Result<(), ErrorKind> {
        if self.nack || address != self.address {
            Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
        } else {
            Ok(())
        }
    }
}

impl I2cBus for MockI2cDevice {
    type Error = ErrorKind;

    fn begin(&mut self, config: &I2cConfig) {
        self.begun = Some(*config);
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.check_ack(address)?;
        self.writes.push((address, data.to_vec()));

        if let Some((&reg, payload)) = data.split_first() {
            self.pointer = reg;
            for &byte in payload {
                self.registers[self.pointer as usize] = byte;
                self.pointer = self.pointer.wrapping_add(1);
            }
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.check_ack(address).is_err() {
            buf.fill(self.scribble);
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        let supplied = buf.len().saturating_sub(self.short_by);
        for slot in buf.iter_mut().take(supplied) {
            *slot = self.registers[self.pointer as usize];
            self.pointer = self.pointer.wrapping_add(1);
        }
        buf[supplied..].fill(self.scribble);
        Ok(supplied)
    }
}

/// CAN controller that can be told to refuse opening
#[derive(Default)]
pub struct MockCan {
    pub refuse_open: bool,
    pub refuse_filter: bool,
    pub pins: Option<(u8, u8)>,
    pub bitrate: Option<u32>,
    pub filter: Option<Filter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockCanError;

impl CanBus for MockCan {
    type Error = MockCanError;

    fn set_pins(&mut self, rx: u8, tx: u8) {
        self.pins = Some((rx, tx));
    }

    fn begin(&mut self, bitrate: u32) -> Result<(), Self::Error> {
        if self.refuse_open {
            return Err(MockCanError);
        }
        self.bitrate = Some(bitrate);
        Ok(())
    }

    fn watch_for(&mut self, filter: Filter) -> Result<(), Self::Error> {
        if self.refuse_filter {
            return Err(MockCanError);
        }
        self.filter = Some(filter);
        Ok(())
    }
}

/// Everything the graphics library was asked to do, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GfxCall {
    Init,
    SetTick,
    CreateDisplay(u16, u16),
    SetBuffers {
        first: BufferRegion,
        second: BufferRegion,
        layout: BufferLayout,
    },
    SetResolution(u16, u16),
    SetPhysicalResolution(u16, u16),
    EnableFlush,
    FlushReady(u32),
    PanelWrite,
    /// Pixels produced into a draw buffer
    Draw,
}

/// Graphics library stand-in
///
/// Shares its call log with [`MockPanel`] so ordering across the two can
/// be checked.
pub struct MockGraphics {
    pub calls: CallLog,
    pub refuse_display: bool,
    pub tick: Option<TickSource>,
    /// Regions registered through `set_buffers`
    pub buffers: Option<(BufferRegion, BufferRegion)>,
    next_display: u32,
}

impl MockGraphics {
    pub fn new(calls: CallLog) -> Self {
        Self {
            calls,
            refuse_display: false,
            tick: None,
            buffers: None,
            next_display: 1,
        }
    }

    pub fn flush_ready_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, GfxCall::FlushReady(_)))
            .count()
    }

    pub fn flush_enabled(&self) -> bool {
        self.calls.borrow().contains(&GfxCall::EnableFlush)
    }
}

impl GraphicsBackend for MockGraphics {
    type Display = u32;

    fn init(&mut self) {
        self.calls.borrow_mut().push(GfxCall::Init);
    }

    fn set_tick_source(&mut self, source: TickSource) {
        self.tick = Some(source);
        self.calls.borrow_mut().push(GfxCall::SetTick);
    }

    fn create_display(&mut self, width: u16, height: u16) -> Option<Self::Display> {
        self.calls
            .borrow_mut()
            .push(GfxCall::CreateDisplay(width, height));
        if self.refuse_display {
            return None;
        }
        let display = self.next_display;
        self.next_display += 1;
        Some(display)
    }

    fn set_buffers(
        &mut self,
        _display: Self::Display,
        first: BufferRegion,
        second: BufferRegion,
        layout: BufferLayout,
    ) {
        self.buffers = Some((first, second));
        self.calls.borrow_mut().push(GfxCall::SetBuffers {
            first,
            second,
            layout,
        });
    }

    fn set_resolution(&mut self, _display: Self::Display, width: u16, height: u16) {
        self.calls
            .borrow_mut()
            .push(GfxCall::SetResolution(width, height));
    }

    fn set_physical_resolution(&mut self, _display: Self::Display, width: u16, height: u16) {
        self.calls
            .borrow_mut()
            .push(GfxCall::SetPhysicalResolution(width, height));
    }

    fn enable_flush(&mut self, _display: Self::Display) {
        self.calls.borrow_mut().push(GfxCall::EnableFlush);
    }

    fn flush_ready(&mut self, display: Self::Display) {
        self.calls.borrow_mut().push(GfxCall::FlushReady(display));
    }
}

/// One windowed write as seen by the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelWrite {
    pub x_start: u16,
    pub x_end: u16,
    pub y_start: u16,
    pub y_end: u16,
    pub ptr: usize,
    pub pixels: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPanelError;

/// LCD panel stand-in recording every window
pub struct MockPanel {
    pub calls: CallLog,
    pub writes: Vec<PanelWrite>,
    pub fail: bool,
}

impl MockPanel {
    pub fn new(calls: CallLog) -> Self {
        Self {
            calls,
            writes: Vec::new(),
            fail: false,
        }
    }
}

impl PanelWindow for MockPanel {
    type Error = MockPanelError;

    fn add_window(
        &mut self,
        x_start: u16,
        x_end: u16,
        y_start: u16,
        y_end: u16,
        pixels: &[u8],
    ) -> Result<(), Self::Error> {
        self.calls.borrow_mut().push(GfxCall::PanelWrite);
        self.writes.push(PanelWrite {
            x_start,
            x_end,
            y_start,
            y_end,
            ptr: pixels.as_ptr() as usize,
            pixels: pixels.to_vec(),
        });
        if self.fail {
            Err(MockPanelError)
        } else {
            Ok(())
        }
    }
}

/// Heap-backed DMA allocator that can be told to run dry
pub struct MockDma {
    pub remaining_allocations: usize,
    pub requests: Vec<(usize, usize)>,
}

impl MockDma {
    pub fn new(remaining_allocations: usize) -> Self {
        Self {
            remaining_allocations,
            requests: Vec::new(),
        }
    }
}

impl DmaAllocator for MockDma {
    fn allocate(&mut self, align: usize, len: usize) -> Option<&'static mut [u8]> {
        self.requests.push((align, len));
        if self.remaining_allocations == 0 {
            return None;
        }
        self.remaining_allocations -= 1;
        Some(leak(len))
    }
}

/// Leak a zeroed buffer for the rest of the test
pub fn leak(len: usize) -> &'static mut [u8] {
    Box::leak(vec![0u8; len].into_boxed_slice())
}

pub fn tick_zero() -> u32 {
    0
}

pub type CallLog = Rc<RefCell<Vec<GfxCall>>>;

pub fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}
