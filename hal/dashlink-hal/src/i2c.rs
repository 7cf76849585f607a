//! I2C bus abstractions
//!
//! Models the controller the way Arduino-style vendor drivers expose it:
//! a write transaction that always ends in STOP, and a read request that
//! reports how many bytes actually arrived.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error: embedded_hal::i2c::Error;

    /// Open the bus on the configured pins
    ///
    /// Called once before any transfer.
    fn begin(&mut self, config: &I2cConfig);

    /// Write data to a device as one transaction ending with STOP
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Request `buf.len()` bytes from a device
    ///
    /// Returns the number of bytes the device actually supplied, which
    /// may be less than requested. Only the first `n` bytes of `buf` are
    /// meaningful.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct I2cConfig {
    /// SDA (data) GPIO
    pub sda: u8,
    /// SCL (clock) GPIO
    pub scl: u8,
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            sda: 15,
            scl: 7,
            frequency: Self::STANDARD,
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: u32 = 100_000;

    /// Fast mode (400 kHz)
    pub const FAST: u32 = 400_000;

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: u32 = 1_000_000;

    /// Create a config for the given pins at standard mode
    pub const fn new(sda: u8, scl: u8) -> Self {
        Self {
            sda,
            scl,
            frequency: Self::STANDARD,
        }
    }

    /// Same pins, different clock
    #[must_use]
    pub const fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }
}
