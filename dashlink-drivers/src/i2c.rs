//! I2C register access
//!
//! Single-register-pointer addressing as used by most sensor ICs: write
//! the register address, then either keep writing data or issue a read
//! request for the bytes that follow it.

use dashlink_core::config::I2cConfig;
use dashlink_hal::I2cBus;
use embedded_hal::i2c::{Error as _, ErrorKind};
use heapless::Vec;

/// Largest transfer the driver stages, matching the vendor driver's RX buffer
pub const MAX_TRANSFER_LEN: usize = 128;

/// Register address plus payload
const FRAME_CAPACITY: usize = MAX_TRANSFER_LEN + 1;

/// I2C driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Transaction was not acknowledged or the bus faulted
    Transmission(ErrorKind),
    /// Device supplied a different number of bytes than requested
    LengthMismatch { requested: usize, received: usize },
    /// Transfer larger than [`MAX_TRANSFER_LEN`]
    TransferTooLong { len: usize },
}

/// Blocking register read/write over an [`I2cBus`]
pub struct I2cDriver<B> {
    bus: B,
    config: I2cConfig,
}

impl<B: I2cBus> I2cDriver<B> {
    /// Open the bus on the configured pins
    pub fn init(mut bus: B, config: I2cConfig) -> Self {
        bus.begin(&config);
        info!(
            "I2C bus opened on SDA={}, SCL={} at {} Hz",
            config.sda,
            config.scl,
            config.frequency
        );
        Self { bus, config }
    }

    /// Configuration the bus was opened with
    pub fn config(&self) -> &I2cConfig {
        &self.config
    }

    /// Read `out.len()` bytes starting at `register`
    ///
    /// `out` is only written when the whole transfer succeeds.
    pub fn read(&mut self, device: u8, register: u8, out: &mut [u8]) -> Result<(), I2cError> {
        let len = out.len();
        if len > MAX_TRANSFER_LEN {
            warn!("I2C read of {} bytes exceeds transfer limit", len);
            return Err(I2cError::TransferTooLong { len });
        }

        if let Err(e) = self.bus.write(device, &[register]) {
            error!(
                "I2C transmission failed - read (addr={}, reg={})",
                device,
                register
            );
            return Err(I2cError::Transmission(e.kind()));
        }

        let mut scratch = [0u8; MAX_TRANSFER_LEN];
        let staged = &mut scratch[..len];
        let received = match self.bus.read(device, staged) {
            Ok(n) => n,
            Err(e) => {
                error!("I2C read request failed (addr={}, reg={})", device, register);
                return Err(I2cError::Transmission(e.kind()));
            }
        };

        if received != len {
            error!(
                "I2C read length mismatch: {} of {} bytes (addr={}, reg={})",
                received,
                len,
                device,
                register
            );
            return Err(I2cError::LengthMismatch {
                requested: len,
                received,
            });
        }

        out.copy_from_slice(staged);
        Ok(())
    }

    /// Write `data` starting at `register` as a single transaction
    pub fn write(&mut self, device: u8, register: u8, data: &[u8]) -> Result<(), I2cError> {
        let len = data.len();
        let mut frame: Vec<u8, FRAME_CAPACITY> = Vec::new();
        frame
            .push(register)
            .map_err(|_| I2cError::TransferTooLong { len })?;
        frame.extend_from_slice(data).map_err(|_| {
            warn!("I2C write of {} bytes exceeds transfer limit", len);
            I2cError::TransferTooLong { len }
        })?;

        self.bus.write(device, &frame).map_err(|e| {
            error!(
                "I2C transmission failed - write (addr={}, reg={})",
                device,
                register
            );
            I2cError::Transmission(e.kind())
        })
    }

    /// Read a single register
    pub fn read_register(&mut self, device: u8, register: u8) -> Result<u8, I2cError> {
        let mut value = [0u8; 1];
        self.read(device, register, &mut value)?;
        Ok(value[0])
    }

    /// Write a single register
    pub fn write_register(&mut self, device: u8, register: u8, value: u8) -> Result<(), I2cError> {
        self.write(device, register, &[value])
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }
}

/// [`I2cBus`] over any `embedded-hal` I2C master
///
/// Chip HALs bind pins when the peripheral is constructed, so `begin` only
/// remembers the configuration. `embedded-hal` reads either fill the
/// whole buffer or fail, so a successful read always reports the full
/// length.
pub struct HalI2c<T> {
    inner: T,
    config: Option<I2cConfig>,
}

impl<T> HalI2c<T> {
    /// Wrap an `embedded-hal` I2C master
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            config: None,
        }
    }

    /// Configuration passed to `begin`, if it has been called
    pub fn config(&self) -> Option<&I2cConfig> {
        self.config.as_ref()
    }

    /// Unwrap the inner master
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: embedded_hal::i2c::I2c> I2cBus for HalI2c<T> {
    type Error = T::Error;

    fn begin(&mut self, config: &I2cConfig) {
        self.config = Some(*config);
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.inner.read(address, buf)?;
        Ok(buf.len())
    }
}
