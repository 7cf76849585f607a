//! CAN bus abstractions
//!
//! Called TWAI (Two-Wire Automotive Interface) in ESP32 documentation.
//! Only bring-up is modelled here: pin assignment, opening the controller
//! at a bitrate, and installing an acceptance filter.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// CAN controller
pub trait CanBus {
    /// Error type for controller operations
    type Error: core::fmt::Debug;

    /// Route the controller to the given RX/TX GPIOs
    fn set_pins(&mut self, rx: u8, tx: u8);

    /// Start the controller at `bitrate` bits per second
    fn begin(&mut self, bitrate: u32) -> Result<(), Self::Error>;

    /// Start accepting frames that pass `filter`
    fn watch_for(&mut self, filter: Filter) -> Result<(), Self::Error>;
}

/// CAN bit timing presets supported by the controller
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Timing {
    B25K,
    B50K,
    B100K,
    B125K,
    B250K,
    #[default]
    B500K,
    B800K,
    B1M,
}

impl Timing {
    /// Nominal bitrate in bits per second
    pub const fn bitrate(self) -> u32 {
        match self {
            Timing::B25K => 25_000,
            Timing::B50K => 50_000,
            Timing::B100K => 100_000,
            Timing::B125K => 125_000,
            Timing::B250K => 250_000,
            Timing::B500K => 500_000,
            Timing::B800K => 800_000,
            Timing::B1M => 1_000_000,
        }
    }

    /// Find the preset for a bitrate, if the controller has one
    pub const fn from_bitrate(bitrate: u32) -> Option<Self> {
        match bitrate {
            25_000 => Some(Timing::B25K),
            50_000 => Some(Timing::B50K),
            100_000 => Some(Timing::B100K),
            125_000 => Some(Timing::B125K),
            250_000 => Some(Timing::B250K),
            500_000 => Some(Timing::B500K),
            800_000 => Some(Timing::B800K),
            1_000_000 => Some(Timing::B1M),
            _ => None,
        }
    }
}

/// Acceptance filter
///
/// `mask` selects which bits of the incoming identifier are compared with
/// `filter`: a `1` bit must match, a `0` bit is ignored. A masked filter
/// only ever passes frames of its own ID width; [`Filter::AcceptAll`]
/// passes both.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Filter {
    /// No filtering: every standard and extended frame is received
    #[default]
    AcceptAll,
    /// Filter for 11 bit standard CAN IDs
    Standard { filter: u16, mask: u16 },
    /// Filter for 29 bit extended CAN IDs
    Extended { filter: u32, mask: u32 },
}

impl Filter {
    /// Filter that allows all standard CAN IDs.
    pub const fn standard_allow_all() -> Self {
        Self::Standard { filter: 0, mask: 0 }
    }

    /// Filter that accepts all extended CAN IDs.
    pub const fn extended_allow_all() -> Self {
        Self::Extended { filter: 0, mask: 0 }
    }

    /// Whether an identifier passes this filter
    pub const fn accepts(&self, id: u32, extended: bool) -> bool {
        match *self {
            Filter::AcceptAll => true,
            Filter::Standard { filter, mask } => {
                !extended && (id as u16 & mask & 0x7FF) == (filter & mask & 0x7FF)
            }
            Filter::Extended { filter, mask } => {
                extended && (id & mask & 0x1FFF_FFFF) == (filter & mask & 0x1FFF_FFFF)
            }
        }
    }
}

/// CAN configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct CanConfig {
    /// Receive GPIO
    pub rx: u8,
    /// Transmit GPIO
    pub tx: u8,
    /// Bitrate in bits per second
    pub bitrate: u32,
    /// Acceptance filter installed when listening starts (none by default)
    pub filter: Filter,
}

impl Default for CanConfig {
    fn default() -> Self {
        Self {
            rx: 16,
            tx: 15,
            bitrate: Timing::B500K.bitrate(),
            filter: Filter::default(),
        }
    }
}

impl CanConfig {
    /// Timing preset for the configured bitrate
    pub const fn timing(&self) -> Option<Timing> {
        Timing::from_bitrate(self.bitrate)
    }
}
