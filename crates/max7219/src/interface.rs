//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`]
//! struct for communicating with the MAX7219/MAX72S19 controller over SPI.
//!
//! ## Hardware Requirements
//!
//! The MAX72S19 is the SPI-compatible variant of the MAX7219: every register
//! write is a single 16-bit frame (register address, then data) latched on
//! the rising edge of chip select. No extra GPIO lines are needed beyond the
//! SPI bus itself: chip select is owned by the [`SpiDevice`] implementation.
//!
//! ## Example
//!
//! ```rust,ignore
//! use max7219::Interface;
//!
//! let interface = Interface::new(spi_device);
//! interface.write_register(0x0C, 0x01)?; // Leave shutdown mode
//! ```

use core::fmt::Debug;
use embedded_hal::spi::SpiDevice;

/// Trait for hardware interface to the MAX7219 controller
///
/// This trait abstracts over different hardware implementations, allowing
/// [`Max7219`](crate::display::Max7219) to work with any transport that can
/// deliver 16-bit register frames. Test code implements it with an in-memory
/// recorder.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Write one register frame (address byte, then data byte)
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying transport fails.
    fn write_register(&mut self, register: u8, data: u8) -> Result<(), Self::Error>;
}

/// Hardware interface implementation for the MAX7219
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 [`SpiDevice`]
/// transports. The device latches a frame on chip-select release, which the
/// `SpiDevice` contract performs after every `write`.
pub struct Interface<SPI> {
    spi: SPI,
}

impl<SPI> Interface<SPI>
where
    SPI: SpiDevice,
{
    /// Create a new Interface around an SPI device
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }
}

impl<SPI> DisplayInterface for Interface<SPI>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
{
    type Error = SPI::Error;

    fn write_register(&mut self, register: u8, data: u8) -> Result<(), Self::Error> {
        self.spi.write(&[register, data])
    }
}
