//! Board-agnostic configuration for Dashlink
//!
//! This crate contains everything about a board that is data rather than
//! code:
//!
//! - Bus pin assignments and clock rates
//! - Panel resolution, colour depth and draw buffer sizing
//! - Validation of the above
//! - Loading overrides from `board.toml` (feature `toml`)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;

pub use config::{BoardConfig, ConfigError, DisplayConfig};
