//! Board configuration
//!
//! Aggregates the per-peripheral configs. The defaults describe the
//! reference board; note that I2C SDA and CAN TX both sit on GPIO15
//! there, so pins are only checked for clashes within a single bus.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Bus, CanConfig, ConfigError, DisplayConfig, I2cConfig};

/// Everything needed to bring up the board's peripherals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct BoardConfig {
    /// Sensor bus
    pub i2c: I2cConfig,
    /// Vehicle bus
    pub can: CanConfig,
    /// LCD panel and draw buffers
    pub display: DisplayConfig,
}

impl BoardConfig {
    /// Check the configuration for values the drivers cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.i2c.sda == self.i2c.scl {
            return Err(ConfigError::InvalidPins(Bus::I2c));
        }
        if self.i2c.frequency == 0 {
            return Err(ConfigError::InvalidFrequency);
        }

        if self.can.rx == self.can.tx {
            return Err(ConfigError::InvalidPins(Bus::Can));
        }
        if self.can.timing().is_none() {
            return Err(ConfigError::UnsupportedBitrate(self.can.bitrate));
        }

        let display = &self.display;
        if display.width == 0 || display.height == 0 {
            return Err(ConfigError::InvalidResolution);
        }
        if !(1..=4).contains(&display.bytes_per_pixel) {
            return Err(ConfigError::InvalidColorDepth(display.bytes_per_pixel));
        }
        if display.frame_bytes().is_none() {
            return Err(ConfigError::InvalidResolution);
        }
        // Every buffer must hold at least one full row
        if display.buffer_factor == 0 || display.buffer_factor as u16 > display.height {
            return Err(ConfigError::InvalidBufferFactor(display.buffer_factor));
        }

        Ok(())
    }
}
