//! Board bring-up
//!
//! Runs each peripheral's init once, in order: I2C, CAN, display. A
//! failing CAN bus or display is logged and reported but does not stop
//! the others; the caller gets the board back either way and decides
//! what to do with a half-working system.

use dashlink_core::config::{BoardConfig, ConfigError};
use dashlink_hal::graphics::{GraphicsBackend, TickSource};
use dashlink_hal::{CanBus, DmaAllocator, I2cBus, PanelWindow};

use crate::can::{CanDriver, CanError};
use crate::display::{allocate_draw_buffers, DisplayError, DisplayPipeline};
use crate::i2c::I2cDriver;

/// Raw peripherals handed to [`Board::bring_up`]
pub struct BoardParts<I, C, G, P, A> {
    /// I2C controller
    pub i2c: I,
    /// CAN (TWAI) controller
    pub can: C,
    /// Graphics library
    pub graphics: G,
    /// LCD panel driver
    pub panel: P,
    /// DMA-capable allocator for the draw buffers
    pub dma: A,
    /// Millisecond tick for the graphics library
    pub tick: TickSource,
}

/// Outcome of each fallible init step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BringUpReport {
    pub can: Result<(), CanError>,
    pub display: Result<(), DisplayError>,
}

impl BringUpReport {
    /// Every peripheral came up
    pub fn is_complete(&self) -> bool {
        self.can.is_ok() && self.display.is_ok()
    }
}

/// Initialized board peripherals
pub struct Board<I, C, G: GraphicsBackend, P> {
    pub i2c: I2cDriver<I>,
    pub can: CanDriver<C>,
    pub display: DisplayPipeline<G, P>,
}

impl<I, C, G, P> Board<I, C, G, P>
where
    I: I2cBus,
    C: CanBus,
    G: GraphicsBackend,
    P: PanelWindow,
{
    /// Validate `config` and bring up every peripheral
    ///
    /// Only an invalid configuration is fatal, and it is caught before any
    /// hardware is touched.
    pub fn bring_up<A: DmaAllocator>(
        config: &BoardConfig,
        parts: BoardParts<I, C, G, P, A>,
    ) -> Result<(Self, BringUpReport), ConfigError> {
        if let Err(e) = config.validate() {
            error!("Invalid board configuration: {:?}", e);
            return Err(e);
        }

        let BoardParts {
            i2c,
            can,
            graphics,
            panel,
            mut dma,
            tick,
        } = parts;

        let i2c = I2cDriver::init(i2c, config.i2c);

        let mut can = CanDriver::new(can, config.can);
        let can_result = can.init();

        let (first, second) = allocate_draw_buffers(&mut dma, &config.display);
        let mut display = DisplayPipeline::new(graphics, panel, config.display);
        let display_result = display.init(first, second, tick).map(|_| ());

        let report = BringUpReport {
            can: can_result,
            display: display_result,
        };
        if report.is_complete() {
            info!("All peripherals up");
        } else {
            warn!("Bring-up incomplete: {:?}", report);
        }

        Ok((Self { i2c, can, display }, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{
        call_log, tick_zero, MockCan, MockDma, MockGraphics, MockI2cDevice, MockPanel,
    };
    use dashlink_core::config::Bus;

    fn parts(
        can: MockCan,
        dma: MockDma,
    ) -> BoardParts<MockI2cDevice, MockCan, MockGraphics, MockPanel, MockDma> {
        let log = call_log();
        BoardParts {
            i2c: MockI2cDevice::new(0x5D),
            can,
            graphics: MockGraphics::new(log.clone()),
            panel: MockPanel::new(log),
            dma,
            tick: tick_zero,
        }
    }

    #[test]
    fn test_everything_comes_up() {
        let config = BoardConfig::default();
        let (mut board, report) =
            Board::bring_up(&config, parts(MockCan::default(), MockDma::new(2))).unwrap();

        assert!(report.is_complete());
        assert!(board.can.is_listening());
        assert!(board.display.is_ready());
        assert_eq!(board.i2c.config(), &config.i2c);
        assert_eq!(board.display.render_full(|_, _| {}), Ok(6));
    }

    #[test]
    fn test_can_failure_does_not_stop_display() {
        let can = MockCan {
            refuse_open: true,
            ..Default::default()
        };
        let (board, report) =
            Board::bring_up(&BoardConfig::default(), parts(can, MockDma::new(2))).unwrap();

        assert_eq!(report.can, Err(CanError::Open));
        assert_eq!(report.display, Ok(()));
        assert!(!board.can.is_listening());
        assert!(board.display.is_ready());
    }

    #[test]
    fn test_buffer_allocation_failure_reported() {
        let (mut board, report) = Board::bring_up(
            &BoardConfig::default(),
            parts(MockCan::default(), MockDma::new(1)),
        )
        .unwrap();

        assert_eq!(report.display, Err(DisplayError::BufferAllocation));
        assert!(!report.is_complete());
        assert!(board.can.is_listening());
        assert!(!board.display.is_ready());
        assert!(!board.display.graphics().flush_enabled());

        // I2C is still usable
        board.i2c.write_register(0x5D, 0x01, 0x02).unwrap();
    }

    #[test]
    fn test_invalid_config_touches_nothing() {
        let mut config = BoardConfig::default();
        config.can.tx = config.can.rx;

        let result = Board::bring_up(&config, parts(MockCan::default(), MockDma::new(2)));
        assert!(matches!(result, Err(ConfigError::InvalidPins(Bus::Can))));
    }
}
