//! MAX7219 panel adapter: `ScoreDisplay` on top of the driver crate.
//!
//! The core's display trait is infallible; SPI failures are logged and
//! dropped here, at the hardware boundary, the same way the rest of the
//! firmware treats transient bus errors.

use core::fmt::Debug;

use embedded_hal::spi::SpiDevice;
use max7219::{Interface, Max7219};
use pongboard_core::ScoreDisplay;

/// Panel scan covers the four score digits plus the three indicator rows.
const SCAN_LIMIT: u8 = 6;
const INTENSITY: u8 = 0xF;

pub struct Panel<SPI> {
    display: Max7219<Interface<SPI>>,
}

impl<SPI> Panel<SPI>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
{
    /// Bring the chip out of shutdown into raw-segment mode with a blank
    /// panel.
    pub fn new(spi: SPI) -> Result<Self, SPI::Error> {
        let mut display = Max7219::new(Interface::new(spi));

        display.set_decode_mode(0x00)?;
        display.set_intensity(INTENSITY)?;
        display.set_scan_limit(SCAN_LIMIT)?;
        display.clear()?;
        display.activate()?;

        Ok(Self { display })
    }
}

impl<SPI> ScoreDisplay for Panel<SPI>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
{
    fn set_row(&mut self, row: u8, states: u8) {
        if self.display.set_row(row, states).is_err() {
            log::warn!("panel: row {row} write failed");
        }
    }

    fn write_char(&mut self, digit_index: u8, character: char, dot: bool) {
        if self.display.write_char(digit_index, character, dot).is_err() {
            log::warn!("panel: digit {digit_index} write failed");
        }
    }

    fn write_number(&mut self, digit_index: u8, number: u8) {
        if self.display.write_number(digit_index, number).is_err() {
            log::warn!("panel: digit {digit_index} write failed");
        }
    }

    fn clear(&mut self) {
        if self.display.clear().is_err() {
            log::warn!("panel: clear failed");
        }
    }
}
