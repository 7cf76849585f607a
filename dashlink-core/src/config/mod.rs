//! Configuration types
//!
//! Board-level configuration: which pins each bus uses, how fast it runs
//! and how the panel's draw buffers are sized.

pub mod board;
pub mod display;
#[cfg(feature = "toml")]
pub mod loader;

pub use board::*;
pub use display::*;
#[cfg(feature = "toml")]
pub use loader::*;

pub use dashlink_hal::can::{CanConfig, Filter, Timing};
pub use dashlink_hal::i2c::I2cConfig;

/// Which bus a configuration error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bus {
    I2c,
    Can,
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Both signals of a bus are routed to the same GPIO
    InvalidPins(Bus),
    /// Bus clock of zero
    InvalidFrequency,
    /// CAN bitrate without a timing preset
    UnsupportedBitrate(u32),
    /// Zero width or height, or a frame larger than 4 GiB
    InvalidResolution,
    /// Bytes per pixel outside 1..=4
    InvalidColorDepth(u8),
    /// Buffer factor of zero, or more buffers than panel rows
    InvalidBufferFactor(u8),
    /// TOML document could not be parsed
    Parse,
}
