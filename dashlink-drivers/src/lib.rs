//! Peripheral drivers for Dashlink boards
//!
//! Thin wrappers that configure vendor drivers through the
//! `dashlink-hal` traits:
//!
//! - I2C register read/write for sensor ICs
//! - CAN bring-up (open at a fixed bitrate, listen to everything)
//! - Double-buffered partial-render flush path between the graphics
//!   library and the LCD panel
//! - Board bring-up tying the three together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod board;
pub mod can;
pub mod display;
pub mod i2c;

#[cfg(test)]
mod mock;

pub use board::{Board, BoardParts, BringUpReport};
pub use can::{CanDriver, CanError, CanState};
pub use display::{DisplayError, DisplayPipeline, DrawBuffers, Slot};
pub use i2c::{HalI2c, I2cDriver, I2cError};
