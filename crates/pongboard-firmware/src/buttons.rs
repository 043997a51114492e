//! Button pins and the ISR edge latches.
//!
//! The GPIO ISR cannot touch the controller, so each falling edge only sets
//! a per-button atomic flag. The tick loop drains the flags at the start of
//! every period and forwards them as `pin_edge` calls. The flags are the
//! only state shared between the two execution contexts.

use core::sync::atomic::{AtomicBool, Ordering};

use esp_idf_svc::hal::gpio::{Gpio2, Gpio3, Gpio4, Input, InterruptType, PinDriver, Pull};
use esp_idf_svc::sys::EspError;

use pongboard_core::{Button, PinLevels};

static EDGE_FLAGS: [AtomicBool; Button::COUNT] = [
    AtomicBool::new(false),
    AtomicBool::new(false),
    AtomicBool::new(false),
];

pub struct Buttons<'d> {
    player1: PinDriver<'d, Gpio2, Input>,
    player2: PinDriver<'d, Gpio3, Input>,
    mode: PinDriver<'d, Gpio4, Input>,
}

impl<'d> Buttons<'d> {
    pub fn new(player1: Gpio2, player2: Gpio3, mode: Gpio4) -> Result<Self, EspError> {
        let mut buttons = Self {
            player1: PinDriver::input(player1)?,
            player2: PinDriver::input(player2)?,
            mode: PinDriver::input(mode)?,
        };

        buttons.setup(Button::Player1)?;
        buttons.setup(Button::Player2)?;
        buttons.setup(Button::Mode)?;
        Ok(buttons)
    }

    fn setup(&mut self, button: Button) -> Result<(), EspError> {
        let index = button.index();

        macro_rules! configure {
            ($pin:expr) => {{
                $pin.set_pull(Pull::Up)?;
                $pin.set_interrupt_type(InterruptType::NegEdge)?;
                // ISR context: the closure may only touch the atomic flag.
                unsafe {
                    $pin.subscribe(move || {
                        EDGE_FLAGS[index].store(true, Ordering::Relaxed);
                    })?;
                }
                $pin.enable_interrupt()?;
            }};
        }

        match button {
            Button::Player1 => configure!(self.player1),
            Button::Player2 => configure!(self.player2),
            Button::Mode => configure!(self.mode),
        }

        Ok(())
    }

    /// Whether a button currently reads pressed (pins are active low).
    pub fn is_pressed(&self, button: Button) -> bool {
        match button {
            Button::Player1 => self.player1.is_low(),
            Button::Player2 => self.player2.is_low(),
            Button::Mode => self.mode.is_low(),
        }
    }

    /// Pin snapshot for this tick.
    pub fn levels(&self) -> PinLevels {
        let mut levels = PinLevels::released();
        for button in Button::ALL {
            levels.set(button, self.is_pressed(button));
        }
        levels
    }

    /// Forward latched edges, rearming each pin's interrupt (esp-idf
    /// disables it after every notification).
    pub fn drain_edges(&mut self, mut forward: impl FnMut(Button, bool)) {
        for button in Button::ALL {
            if EDGE_FLAGS[button.index()].swap(false, Ordering::Relaxed) {
                forward(button, self.is_pressed(button));

                let rearm = match button {
                    Button::Player1 => self.player1.enable_interrupt(),
                    Button::Player2 => self.player2.enable_interrupt(),
                    Button::Mode => self.mode.enable_interrupt(),
                };
                if rearm.is_err() {
                    log::warn!("buttons: failed to rearm {button:?} interrupt");
                }
            }
        }
    }
}
