//! Dashlink Hardware Abstraction Layer
//!
//! This crate defines the seams between the Dashlink drivers and the
//! vendor code underneath them: bus controllers, the LCD panel, the
//! graphics library and the DMA-capable heap. Chip support crates (or
//! test mocks) implement these traits; `dashlink-drivers` only ever talks
//! to the traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Board bring-up (dashlink-drivers)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dashlink-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┼───────────┐
//!         ▼           ▼           ▼
//! ┌─────────────┐ ┌─────────┐ ┌───────────┐
//! │ I2C / TWAI  │ │  panel  │ │ graphics  │
//! │ controllers │ │ (ST7701)│ │  library  │
//! └─────────────┘ └─────────┘ └───────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`can::CanBus`] - CAN controller bring-up
//! - [`panel::PanelWindow`] - Windowed pixel writes to the LCD
//! - [`graphics::GraphicsBackend`] - Graphics library display registration
//! - [`dma::DmaAllocator`] - DMA-capable buffer allocation

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod can;
pub mod dma;
pub mod graphics;
pub mod i2c;
pub mod panel;

// Re-export key traits at crate root for convenience
pub use can::CanBus;
pub use dma::DmaAllocator;
pub use graphics::{Area, GraphicsBackend};
pub use i2c::I2cBus;
pub use panel::PanelWindow;
