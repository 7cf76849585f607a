//! CAN bus bring-up
//!
//! Opens the controller at the configured bitrate and starts listening
//! with the configured acceptance filter. By default no filter is set and
//! both standard and extended frames are received. There is
//! no frame handling here; consumers read frames from the controller
//! directly once it is listening.

use dashlink_core::config::CanConfig;
use dashlink_hal::CanBus;

/// CAN driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanError {
    /// Controller refused to start at the requested bitrate
    Open,
    /// Controller started but would not accept the filter
    Listen,
}

/// Lifecycle of the controller as seen by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanState {
    /// `init` has not run
    Idle,
    /// `init` ran and failed; the bus is unusable
    Failed(CanError),
    /// Controller is open and receiving
    Listening,
}

/// CAN controller bring-up
pub struct CanDriver<B> {
    bus: B,
    config: CanConfig,
    state: CanState,
}

impl<B: CanBus> CanDriver<B> {
    /// Take ownership of the controller; nothing is touched until [`init`](Self::init)
    pub fn new(bus: B, config: CanConfig) -> Self {
        Self {
            bus,
            config,
            state: CanState::Idle,
        }
    }

    /// Assign pins, open the bus and start listening
    ///
    /// Failure is logged and recorded in [`state`](Self::state); the rest
    /// of the system is expected to keep running without the bus.
    pub fn init(&mut self) -> Result<(), CanError> {
        if self.state == CanState::Listening {
            warn!("CAN bus already initialized");
            return Ok(());
        }

        let CanConfig {
            rx,
            tx,
            bitrate,
            filter,
        } = self.config;

        self.bus.set_pins(rx, tx);

        if self.bus.begin(bitrate).is_err() {
            error!("CAN bus initialization failed");
            self.state = CanState::Failed(CanError::Open);
            return Err(CanError::Open);
        }

        if self.bus.watch_for(filter).is_err() {
            error!("CAN bus filter setup failed");
            self.state = CanState::Failed(CanError::Listen);
            return Err(CanError::Listen);
        }

        self.state = CanState::Listening;
        info!(
            "CAN bus initialized at {} bps on RX={}, TX={}",
            bitrate,
            rx,
            tx
        );
        Ok(())
    }

    /// Current lifecycle state
    pub fn state(&self) -> CanState {
        self.state
    }

    /// Whether the controller is receiving frames
    pub fn is_listening(&self) -> bool {
        self.state == CanState::Listening
    }

    pub fn config(&self) -> &CanConfig {
        &self.config
    }

    /// Borrow the controller, e.g. to read frames
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give the controller back
    pub fn release(self) -> B {
        self.bus
    }
}
