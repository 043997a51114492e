use pongboard_core::{Button, GameState};
use pongboard_scenario_harness::ScenarioHarness;

#[test]
fn bouncy_press_scores_exactly_one_point() {
    let mut harness = ScenarioHarness::new();
    harness.press(Button::Player1); // start the match

    harness.bouncy_press(Button::Player1);

    assert_eq!(harness.game().game_scores(), [1, 0]);
}

#[test]
fn presses_inside_one_debounce_window_count_once() {
    let mut harness = ScenarioHarness::new();
    harness.press(Button::Player1);

    // Two physical taps landing within DEBOUNCE_TICKS of each other.
    harness.push(Button::Player1);
    harness.run_ticks(3);
    harness.release(Button::Player1);
    harness.run_ticks(2);
    harness.push(Button::Player1);
    harness.run_ticks(3);
    harness.release(Button::Player1);
    harness.run_ticks(30);

    assert_eq!(harness.game().game_scores(), [1, 0]);
}

#[test]
fn long_hold_emits_no_press() {
    let mut harness = ScenarioHarness::new();
    harness.press(Button::Player1);
    harness.press(Button::Player1);
    harness.press(Button::Player1);
    assert_eq!(harness.game().game_scores(), [2, 0]);

    // The hold removes one point; the release must not add one back.
    harness.long_press(Button::Player1);

    assert_eq!(harness.game().game_scores(), [1, 0]);
    assert_eq!(harness.game().state(), GameState::InGame);
}

#[test]
fn separate_presses_past_the_debounce_window_all_count() {
    let mut harness = ScenarioHarness::new();
    harness.press(Button::Player1);

    for _ in 0..5 {
        harness.press(Button::Player1);
    }

    assert_eq!(harness.game().game_scores(), [5, 0]);
}
