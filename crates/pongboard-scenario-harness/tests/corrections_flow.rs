use pongboard_core::display::{LED_PLAYER2, ROW_TURN_LEDS};
use pongboard_core::{Button, GameState, Player};
use pongboard_scenario_harness::ScenarioHarness;

fn score(harness: &mut ScenarioHarness, button: Button, times: u32) {
    for _ in 0..times {
        harness.press(button);
    }
}

/// Bring a fresh harness to 5-3 with player 1 starting.
fn harness_at_5_3() -> ScenarioHarness {
    let mut harness = ScenarioHarness::new();
    harness.press(Button::Player1);
    score(&mut harness, Button::Player2, 3);
    score(&mut harness, Button::Player1, 5);
    assert_eq!(harness.game().game_scores(), [5, 3]);
    harness
}

#[test]
fn long_press_removes_a_point_and_recomputes_serve() {
    let mut harness = harness_at_5_3();

    harness.long_press(Button::Player1);

    assert_eq!(harness.game().game_scores(), [4, 3]);
    // Combined total 7: the serve now belongs to the non-starting player.
    assert_eq!(harness.game().current_player(), Some(Player::Two));
    assert_eq!(harness.display().row(ROW_TURN_LEDS), 1 << LED_PLAYER2);
}

#[test]
fn long_press_at_zero_removes_nothing() {
    let mut harness = ScenarioHarness::new();
    harness.press(Button::Player1);

    harness.long_press(Button::Player2);

    assert_eq!(harness.game().game_scores(), [0, 0]);
    assert_eq!(harness.game().state(), GameState::InGame);
}

#[test]
fn long_press_reverts_a_just_won_game() {
    let mut harness = ScenarioHarness::new();
    harness.press(Button::Player1);
    score(&mut harness, Button::Player2, 9);
    score(&mut harness, Button::Player1, 11); // 11-9, game over
    assert_eq!(harness.game().state(), GameState::GameOver);

    harness.long_press(Button::Player1);

    assert_eq!(harness.game().state(), GameState::InGame);
    assert_eq!(harness.game().game_scores(), [10, 9]);
    assert_eq!(harness.game().set_scores(), [0, 0]);
    assert_eq!(harness.game().all_time_scores(), [0, 0]);
}

#[test]
fn long_press_that_cannot_reopen_the_game_is_a_noop() {
    let mut harness = ScenarioHarness::new();
    harness.press(Button::Player1);
    score(&mut harness, Button::Player2, 3);
    score(&mut harness, Button::Player1, 11); // 11-3

    // Removing a loser point leaves the game decided: nothing changes.
    harness.long_press(Button::Player2);

    assert_eq!(harness.game().state(), GameState::GameOver);
    assert_eq!(harness.game().game_scores(), [11, 3]);
    assert_eq!(harness.game().set_scores(), [1, 0]);
}

#[test]
fn holding_both_buttons_changes_ends() {
    let mut harness = harness_at_5_3();

    harness.hold_both_players();

    // The first long press removes a point, the second compensates and
    // swaps: net effect is the sides trading scores.
    assert_eq!(harness.game().game_scores(), [3, 5]);
    assert_eq!(harness.game().state(), GameState::InGame);
}

#[test]
fn changing_ends_twice_restores_set_and_all_time_totals() {
    let mut harness = ScenarioHarness::with_stored_scores([4, 1]);
    harness.press(Button::Player1);
    score(&mut harness, Button::Player2, 3);
    score(&mut harness, Button::Player1, 5);

    harness.hold_both_players();
    assert_eq!(harness.game().all_time_scores(), [1, 4]);

    harness.hold_both_players();
    assert_eq!(harness.game().all_time_scores(), [4, 1]);
    assert_eq!(harness.game().set_scores(), [0, 0]);
}

#[test]
fn long_press_in_idle_does_nothing() {
    let mut harness = ScenarioHarness::new();

    harness.long_press(Button::Player1);

    assert_eq!(harness.game().state(), GameState::Idle);
    assert_eq!(harness.game().game_scores(), [0, 0]);
}
