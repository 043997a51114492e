//! Per-button debounce and press/long-press detection.
//!
//! Two paths touch a button's state. The edge-notification path runs on a
//! physical level change and writes only `down` and (after a clean quiet
//! period) `last_down`. The per-tick scan owns every other field. No field
//! has two writers, which is what keeps the pair race-free without a lock.

use crate::input::{Button, InputEvent};
use crate::Tick;

/// Quiet period a new falling edge must follow to restart the press timer,
/// and the minimum spacing between two emitted presses.
pub const DEBOUNCE_TICKS: Tick = 25;

/// Minimum ticks a button must be down before a release counts as a press.
pub const PRESS_TICKS: Tick = 1;

/// Ticks of continuous hold before a long press fires.
pub const LONG_PRESS_TICKS: Tick = 750;

#[derive(Debug, Clone, Copy, Default)]
struct ButtonState {
    down: bool,
    held: bool,
    last_down: Tick,
    last_press: Tick,
}

/// Debounce state for all three physical buttons.
#[derive(Debug, Default)]
pub struct ButtonMonitor {
    states: [ButtonState; Button::COUNT],
}

impl ButtonMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edge-notification entry point. Falling edges only; rising edges are
    /// handled by the scan. Refreshing `last_down` only after a quiet period
    /// is what filters electrical bounce: a burst of edges keeps the original
    /// press timer.
    pub fn pin_edge(&mut self, button: Button, pressed: bool, now: Tick) {
        if !pressed {
            return;
        }

        let state = &mut self.states[button.index()];
        state.down = true;

        if now.wrapping_sub(state.last_down) > DEBOUNCE_TICKS {
            state.last_down = now;
        }
    }

    /// Whether the button is currently in its long-hold phase.
    pub fn is_held(&self, button: Button) -> bool {
        self.states[button.index()].held
    }

    /// Per-tick scan for one button. Returns at most one event: a `Press` on
    /// release (never after a long hold), or a `LongPress` once per
    /// continuous hold.
    pub fn scan_button(&mut self, button: Button, now: Tick, pressed: bool) -> Option<InputEvent> {
        let state = &mut self.states[button.index()];
        let was_down = state.down;
        let was_held = state.held;

        if !pressed {
            state.down = false;
            state.held = false;

            if was_down
                && !was_held
                && now.wrapping_sub(state.last_press) >= DEBOUNCE_TICKS
                && now.wrapping_sub(state.last_down) >= PRESS_TICKS
            {
                state.last_press = now;
                return Some(InputEvent::Press(button));
            }

            return None;
        }

        if now.wrapping_sub(state.last_down) > LONG_PRESS_TICKS && !state.held {
            state.held = true;
            return Some(InputEvent::LongPress(button));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BTN: Button = Button::Player1;

    /// Drive `scan_button` for `from..=to` ticks at a constant level and
    /// collect whatever events fire.
    fn scan_range(
        monitor: &mut ButtonMonitor,
        from: Tick,
        to: Tick,
        pressed: bool,
    ) -> Vec<InputEvent> {
        (from..=to)
            .filter_map(|now| monitor.scan_button(BTN, now, pressed))
            .collect()
    }

    #[test]
    fn clean_press_emits_once_on_release() {
        let mut monitor = ButtonMonitor::new();

        monitor.pin_edge(BTN, true, 100);
        assert_eq!(scan_range(&mut monitor, 100, 110, true), vec![]);
        assert_eq!(
            scan_range(&mut monitor, 111, 140, false),
            vec![InputEvent::Press(BTN)]
        );
    }

    #[test]
    fn rising_edges_are_ignored() {
        let mut monitor = ButtonMonitor::new();
        monitor.pin_edge(BTN, false, 100);
        assert_eq!(scan_range(&mut monitor, 100, 140, false), vec![]);
    }

    #[test]
    fn bounce_burst_yields_at_most_one_press() {
        let mut monitor = ButtonMonitor::new();

        // A press with contact bounce: edges and brief releases all landing
        // within DEBOUNCE_TICKS of each other.
        monitor.pin_edge(BTN, true, 100);
        monitor.scan_button(BTN, 100, true);
        let first = monitor.scan_button(BTN, 103, false);
        monitor.pin_edge(BTN, true, 105);
        monitor.scan_button(BTN, 105, true);
        let second = monitor.scan_button(BTN, 108, false);
        monitor.pin_edge(BTN, true, 110);
        monitor.scan_button(BTN, 110, true);
        let third = monitor.scan_button(BTN, 113, false);

        let presses = [first, second, third]
            .iter()
            .filter(|e| e.is_some())
            .count();
        assert_eq!(presses, 1);
    }

    #[test]
    fn next_press_after_quiet_period_is_accepted() {
        let mut monitor = ButtonMonitor::new();

        monitor.pin_edge(BTN, true, 100);
        monitor.scan_button(BTN, 100, true);
        assert_eq!(
            monitor.scan_button(BTN, 105, false),
            Some(InputEvent::Press(BTN))
        );

        // Well past the debounce window: a fresh press counts again.
        monitor.pin_edge(BTN, true, 200);
        monitor.scan_button(BTN, 200, true);
        assert_eq!(
            monitor.scan_button(BTN, 210, false),
            Some(InputEvent::Press(BTN))
        );
    }

    #[test]
    fn long_press_fires_exactly_once_per_hold() {
        let mut monitor = ButtonMonitor::new();

        monitor.pin_edge(BTN, true, 100);
        let events = scan_range(&mut monitor, 100, 100 + LONG_PRESS_TICKS + 50, true);
        assert_eq!(events, vec![InputEvent::LongPress(BTN)]);
        assert!(monitor.is_held(BTN));
    }

    #[test]
    fn release_after_long_hold_emits_no_press() {
        let mut monitor = ButtonMonitor::new();

        monitor.pin_edge(BTN, true, 100);
        scan_range(&mut monitor, 100, 100 + LONG_PRESS_TICKS + 1, true);
        assert_eq!(
            monitor.scan_button(BTN, 100 + LONG_PRESS_TICKS + 2, false),
            None
        );
        assert!(!monitor.is_held(BTN));
    }

    #[test]
    fn sub_press_ticks_blip_is_ignored() {
        let mut monitor = ButtonMonitor::new();

        // Down and up within the same tick: shorter than PRESS_TICKS.
        monitor.pin_edge(BTN, true, 100);
        assert_eq!(monitor.scan_button(BTN, 100, false), None);
    }
}
