//! Driver for the MAX7219 / MAX72S19 serially interfaced 8-digit LED display
//! driver, built on embedded-hal v1.0.
//!
//! The chip multiplexes up to eight digit registers over a handful of common
//! cathode lines; each register drives either one 7-segment digit or one row
//! of eight discrete LEDs. This driver keeps a per-digit write cache so that
//! repeated writes of the same value never reach the bus.

#![cfg_attr(not(test), no_std)]

mod command;
mod display;
mod interface;

pub use command::*;
pub use display::Max7219;
pub use interface::{DisplayInterface, Interface};

/// Number of digit registers on the chip.
pub const NUM_DIGITS: usize = 8;
