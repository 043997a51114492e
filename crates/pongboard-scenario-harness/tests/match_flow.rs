use pongboard_core::display::{
    DIGIT_P1_ONES, DIGIT_P2_ONES, LED_PLAYER1, LED_PLAYER2, ROW_TURN_LEDS,
};
use pongboard_core::{
    Animation, Button, DisplayMode, GameState, Melody, Player, SequenceKind, Track,
};
use pongboard_scenario_harness::ScenarioHarness;

fn score(harness: &mut ScenarioHarness, button: Button, times: u32) {
    for _ in 0..times {
        harness.press(button);
    }
}

#[test]
fn fresh_device_first_press_starts_match() {
    let mut harness = ScenarioHarness::new();

    harness.press(Button::Player1);

    assert_eq!(harness.game().state(), GameState::InGame);
    assert_eq!(harness.game().starting_player(), Some(Player::One));
    assert_eq!(harness.game().current_player(), Some(Player::One));
    assert_eq!(harness.display().row(ROW_TURN_LEDS), 1 << LED_PLAYER1);
}

#[test]
fn eleven_points_with_two_point_lead_ends_the_game() {
    let mut harness = ScenarioHarness::new();
    harness.press(Button::Player1); // player 1 starts

    score(&mut harness, Button::Player2, 9);
    score(&mut harness, Button::Player1, 10);
    assert_eq!(harness.game().state(), GameState::InGame);

    harness.press(Button::Player1); // 11-9

    assert_eq!(harness.game().state(), GameState::GameOver);
    assert_eq!(harness.game().game_scores(), [11, 9]);
    assert_eq!(harness.game().set_scores(), [1, 0]);
    assert_eq!(harness.game().all_time_scores(), [1, 0]);

    // Win feedback armed on both tracks.
    assert_eq!(
        harness.controller().sequencer().active(Track::Visual),
        Some(SequenceKind::Animation(Animation::Player1Win))
    );
    assert_eq!(
        harness.controller().sequencer().active(Track::Audio),
        Some(SequenceKind::Melody(Melody::Win))
    );
}

#[test]
fn deuce_needs_a_two_point_lead() {
    let mut harness = ScenarioHarness::new();
    harness.press(Button::Player1);

    score(&mut harness, Button::Player2, 10);
    score(&mut harness, Button::Player1, 10);
    assert_eq!(harness.game().game_scores(), [10, 10]);
    assert_eq!(harness.game().state(), GameState::InGame);

    harness.press(Button::Player1); // 11-10: one-point lead is not enough
    assert_eq!(harness.game().state(), GameState::InGame);

    harness.press(Button::Player1); // 12-10
    assert_eq!(harness.game().state(), GameState::GameOver);
    assert_eq!(harness.game().game_scores(), [12, 10]);
}

#[test]
fn turn_indicator_alternates_every_two_points() {
    let mut harness = ScenarioHarness::new();
    harness.press(Button::Player1);

    let p1 = 1 << LED_PLAYER1;
    let p2 = 1 << LED_PLAYER2;

    let mut rows = Vec::new();
    for rally in 0..8 {
        rows.push(harness.display().row(ROW_TURN_LEDS));
        // Alternate scorers to keep the game going.
        let button = if rally % 2 == 0 {
            Button::Player1
        } else {
            Button::Player2
        };
        harness.press(button);
    }

    assert_eq!(rows, vec![p1, p1, p2, p2, p1, p1, p2, p2]);
}

#[test]
fn press_after_game_over_starts_new_game_with_other_server() {
    let mut harness = ScenarioHarness::new();
    harness.press(Button::Player1);
    score(&mut harness, Button::Player1, 11); // 11-0

    assert_eq!(harness.game().state(), GameState::GameOver);

    harness.press(Button::Player2);

    assert_eq!(harness.game().state(), GameState::InGame);
    assert_eq!(harness.game().game_scores(), [0, 0]);
    assert_eq!(harness.game().starting_player(), Some(Player::Two));
    assert_eq!(harness.game().current_player(), Some(Player::Two));
    assert_eq!(harness.game().display_mode(), DisplayMode::Game);
    assert_eq!(harness.display().row(ROW_TURN_LEDS), 1 << LED_PLAYER2);

    // Fresh 0-0 on the panel, player 1's digit keeps its marker dot.
    assert_eq!(harness.display().char_at(DIGIT_P1_ONES), Some(('0', true)));
    assert_eq!(harness.display().char_at(DIGIT_P2_ONES), Some(('0', false)));
}
