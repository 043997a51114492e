//! Host-side scenario test harness for scripted button flows.
//!
//! Couples a [`Controller`] with the in-memory device doubles and simulates
//! real input timing: pin edges, held levels, contact bounce, and the tick
//! pump. Scenario tests under `tests/` drive entire match flows through the
//! same path the firmware uses.

use pongboard_core::{
    Button, Controller, MemoryStore, MockDisplay, MockTone, PinLevels, Tick,
    DEBOUNCE_TICKS, LONG_PRESS_TICKS, SAVE_COALESCE_TICKS,
};

/// Ticks the harness pumps right after boot, enough for the debounce gate to
/// age past its power-on value while the splash is still running.
const BOOT_SETTLE_TICKS: Tick = 50;

/// Ticks a scripted press stays down before release.
const PRESS_HOLD_TICKS: Tick = 10;

pub struct ScenarioHarness {
    controller: Controller<MockDisplay, MockTone, MemoryStore>,
    levels: PinLevels,
}

impl ScenarioHarness {
    /// Boot with empty storage.
    pub fn new() -> Self {
        Self::with_stored_scores([0, 0])
    }

    /// Boot with all-time scores already in storage.
    pub fn with_stored_scores(scores: [u16; 2]) -> Self {
        let mut harness = Self {
            controller: Controller::new(
                MockDisplay::new(),
                MockTone::new(),
                MemoryStore::with_scores(scores),
            ),
            levels: PinLevels::released(),
        };
        harness.run_ticks(BOOT_SETTLE_TICKS);
        harness
    }

    /// Pump `ticks` periods with the current pin levels.
    pub fn run_ticks(&mut self, ticks: Tick) {
        for _ in 0..ticks {
            self.controller.tick(self.levels);
        }
    }

    /// Press a button's pin down: the edge notification fires, then the
    /// level reads pressed on following ticks.
    pub fn push(&mut self, button: Button) {
        self.levels.set(button, true);
        self.controller.pin_edge(button, true);
    }

    /// Release a button's pin.
    pub fn release(&mut self, button: Button) {
        self.levels.set(button, false);
    }

    /// One clean short press followed by a quiet period.
    pub fn press(&mut self, button: Button) {
        self.push(button);
        self.run_ticks(PRESS_HOLD_TICKS);
        self.release(button);
        self.run_ticks(DEBOUNCE_TICKS + 5);
    }

    /// Hold a button until its long press fires, then release and settle.
    pub fn long_press(&mut self, button: Button) {
        self.push(button);
        self.run_ticks(LONG_PRESS_TICKS + 5);
        self.release(button);
        self.run_ticks(DEBOUNCE_TICKS + 5);
    }

    /// Hold both player buttons through the change-ends gesture.
    pub fn hold_both_players(&mut self) {
        self.push(Button::Player1);
        self.push(Button::Player2);
        self.run_ticks(LONG_PRESS_TICKS + 5);
        self.release(Button::Player1);
        self.release(Button::Player2);
        self.run_ticks(DEBOUNCE_TICKS + 5);
    }

    /// A press with contact bounce: several edges and micro-releases inside
    /// one debounce window, then a clean release.
    pub fn bouncy_press(&mut self, button: Button) {
        for _ in 0..4 {
            self.push(button);
            self.run_ticks(2);
            self.release(button);
            self.run_ticks(1);
        }
        self.push(button);
        self.run_ticks(PRESS_HOLD_TICKS);
        self.release(button);
        self.run_ticks(DEBOUNCE_TICKS + 5);
    }

    /// Pump past the next persistence coalescing window.
    pub fn run_save_window(&mut self) {
        self.run_ticks(SAVE_COALESCE_TICKS + 1);
    }

    pub fn controller(&self) -> &Controller<MockDisplay, MockTone, MemoryStore> {
        &self.controller
    }

    pub fn game(&self) -> &pongboard_core::GameEngine {
        self.controller.game()
    }

    pub fn display(&self) -> &MockDisplay {
        self.controller.display()
    }

    pub fn tone(&self) -> &MockTone {
        self.controller.tone()
    }

    pub fn store(&self) -> &MemoryStore {
        self.controller.store()
    }

    pub fn ticks(&self) -> Tick {
        self.controller.ticks()
    }
}

impl Default for ScenarioHarness {
    fn default() -> Self {
        Self::new()
    }
}
