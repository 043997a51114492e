//! The match/score/display-mode state machine.
//!
//! Consumes debounced button events and tick time, drives the display and
//! the sequencer, and performs coalesced writes of the all-time scores to
//! durable storage. Every state/event combination is total: unmatched
//! combinations are defined no-ops, never failures.

use crate::animation::Animation;
use crate::display::{
    write_score, ScoreDisplay, LED_MODE_ALL_TIME, LED_MODE_GAME, LED_MODE_SET, LED_PLAYER1,
    LED_PLAYER2, LED_SAVED, ROW_MODE_LEDS, ROW_STATUS_LEDS, ROW_TURN_LEDS,
};
use crate::input::{InputEvent, Player};
use crate::melody::{Melody, MelodyPlayer};
use crate::sequencer::{SequenceKind, Sequencer, Track};
use crate::store::ScoreStore;
use crate::tone::ToneChannel;
use crate::Tick;

pub const POINTS_TO_WIN: u16 = 11;
pub const MIN_WIN_DIFF: u16 = 2;
/// The serve changes hands every this many combined points.
pub const SERVE_SWITCH_EVERY: u16 = 2;
/// Minimum spacing between persistence write windows: ~30 s at the 2 ms tick.
pub const SAVE_COALESCE_TICKS: Tick = 15_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Idle,
    InGame,
    GameOver,
}

/// Which score pair the panel currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Game,
    Set,
    AllTime,
}

impl DisplayMode {
    /// Mode-button cycle order, wrapping after AllTime.
    pub fn next(self) -> DisplayMode {
        match self {
            DisplayMode::Game => DisplayMode::Set,
            DisplayMode::Set => DisplayMode::AllTime,
            DisplayMode::AllTime => DisplayMode::Game,
        }
    }
}

/// The output surfaces an event handler may touch, passed explicitly so the
/// engine itself stays free of device generics.
pub struct Outputs<'a, D, T> {
    pub display: &'a mut D,
    pub tone: &'a mut T,
    pub sequencer: &'a mut Sequencer,
    pub melody: &'a mut MelodyPlayer,
}

/// Scoring/state machine for the two-player match.
#[derive(Debug)]
pub struct GameEngine {
    state: GameState,
    display_mode: DisplayMode,
    starting_player: Option<Player>,
    current_player: Option<Player>,
    game_scores: [u16; 2],
    set_scores: [u16; 2],
    all_time_scores: [u16; 2],
    /// Mirror of the last values known to be durably written. Converges to
    /// `all_time_scores` only through the coalesced save in [`tick`].
    ///
    /// [`tick`]: GameEngine::tick
    cached_all_time_scores: [u16; 2],
    last_saved: Tick,
}

impl GameEngine {
    /// Build the engine around the all-time scores loaded from storage.
    pub fn new(all_time_scores: [u16; 2]) -> Self {
        Self {
            state: GameState::Idle,
            display_mode: DisplayMode::Game,
            starting_player: None,
            current_player: None,
            game_scores: [0, 0],
            set_scores: [0, 0],
            all_time_scores,
            cached_all_time_scores: all_time_scores,
            last_saved: 0,
        }
    }

    /// Initial render plus the power-on splash and melody.
    pub fn startup<D: ScoreDisplay, T: ToneChannel>(&mut self, out: &mut Outputs<'_, D, T>) {
        self.refresh_display(out.display);
        out.sequencer
            .trigger(Track::Visual, Animation::Startup.sequence());
        out.melody.trigger(out.sequencer, out.tone, Melody::Startup);
    }

    /// Dispatch one debounced button event. `both_players_held` is the held
    /// state of the two player buttons at the instant the event fired, which
    /// is what distinguishes the change-ends gesture from a lone long press.
    pub fn handle_event<D: ScoreDisplay, T: ToneChannel>(
        &mut self,
        event: InputEvent,
        both_players_held: bool,
        now: Tick,
        out: &mut Outputs<'_, D, T>,
    ) {
        match event {
            InputEvent::Press(button) => {
                out.melody.trigger(out.sequencer, out.tone, Melody::ButtonPress);
                match button.player() {
                    Some(player) => self.player_press(player, out),
                    None => self.mode_press(out),
                }
            }
            InputEvent::LongPress(button) => {
                out.melody
                    .trigger(out.sequencer, out.tone, Melody::ButtonLongPress);
                match button.player() {
                    Some(player) => self.player_long_press(player, both_players_held, out),
                    None => self.mode_long_press(now, out),
                }
            }
        }
    }

    /// Per-tick work: the coalesced persistence of the all-time scores.
    /// A slot is written at most once per window and only when it changed.
    pub fn tick<D: ScoreDisplay, S: ScoreStore>(
        &mut self,
        now: Tick,
        display: &mut D,
        store: &mut S,
    ) {
        if now.wrapping_sub(self.last_saved) < SAVE_COALESCE_TICKS {
            return;
        }

        for player in Player::BOTH {
            let index = player.index();
            if self.all_time_scores[index] != self.cached_all_time_scores[index] {
                store.write(player, self.all_time_scores[index]);
                self.cached_all_time_scores[index] = self.all_time_scores[index];
                log::info!(
                    "all-time score for {:?} saved ({})",
                    player,
                    self.all_time_scores[index]
                );
            }
        }

        self.last_saved = now;
        self.render_saved_led(display);
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn starting_player(&self) -> Option<Player> {
        self.starting_player
    }

    pub fn current_player(&self) -> Option<Player> {
        self.current_player
    }

    pub fn game_scores(&self) -> [u16; 2] {
        self.game_scores
    }

    pub fn set_scores(&self) -> [u16; 2] {
        self.set_scores
    }

    pub fn all_time_scores(&self) -> [u16; 2] {
        self.all_time_scores
    }

    /// Whether every all-time score has reached durable storage.
    pub fn scores_saved(&self) -> bool {
        self.all_time_scores == self.cached_all_time_scores
    }

    /// True iff some player reached the winning score with a sufficient lead.
    pub fn is_game_over(&self) -> bool {
        let [p1, p2] = self.game_scores;
        p1.max(p2) >= POINTS_TO_WIN && p1.abs_diff(p2) >= MIN_WIN_DIFF
    }

    /// Render a visual-sequence frame. Win animations blink the live game
    /// scores, so frame rendering goes through the engine.
    pub fn render_animation_frame<D: ScoreDisplay>(
        &self,
        animation: Animation,
        position: u32,
        display: &mut D,
    ) {
        animation.render(position, self.game_scores, display);
    }

    /// Full re-render: scores for the current mode plus all indicator rows.
    pub fn refresh_display<D: ScoreDisplay>(&self, display: &mut D) {
        self.refresh_scores(display);
        self.render_turn(display);
        self.render_mode_leds(display);
        self.render_saved_led(display);
    }

    fn player_press<D: ScoreDisplay, T: ToneChannel>(
        &mut self,
        player: Player,
        out: &mut Outputs<'_, D, T>,
    ) {
        match self.state {
            GameState::Idle => {
                let starting = match self.starting_player {
                    None => {
                        self.starting_player = Some(player);
                        player
                    }
                    Some(recorded) => recorded,
                };
                self.current_player = Some(starting);
                self.state = GameState::InGame;
                log::info!("match started, {starting:?} serves");
                self.render_turn(out.display);
            }
            GameState::InGame => self.add_point(player, out),
            GameState::GameOver => self.start_new_game(out),
        }
    }

    fn add_point<D: ScoreDisplay, T: ToneChannel>(
        &mut self,
        player: Player,
        out: &mut Outputs<'_, D, T>,
    ) {
        self.game_scores[player.index()] += 1;

        if self.is_game_over() {
            let winner = self.leading_player().unwrap_or(player);
            self.set_scores[winner.index()] += 1;
            self.all_time_scores[winner.index()] += 1;
            self.state = GameState::GameOver;
            log::info!(
                "game over {}-{}, {winner:?} wins",
                self.game_scores[0],
                self.game_scores[1]
            );
            self.refresh_scores(out.display);
            out.sequencer
                .trigger(Track::Visual, Animation::win_for(winner).sequence());
            out.melody.trigger(out.sequencer, out.tone, Melody::Win);
            return;
        }

        self.current_player = self.serving_player();
        self.refresh_scores(out.display);
        self.render_turn(out.display);
    }

    fn start_new_game<D: ScoreDisplay, T: ToneChannel>(&mut self, out: &mut Outputs<'_, D, T>) {
        // GameOver is unreachable without a recorded starting player; keep
        // the bare branch a defined no-op rather than inventing behavior.
        let Some(previous_starting) = self.starting_player else {
            return;
        };
        let starting = previous_starting.other();

        self.game_scores = [0, 0];
        self.starting_player = Some(starting);
        self.current_player = Some(starting);
        self.state = GameState::InGame;
        self.display_mode = DisplayMode::Game;

        // Cut a still-running win animation at its terminal frame.
        self.clear_visual(out);
        log::info!("new game, {starting:?} serves");
        self.refresh_display(out.display);
    }

    fn player_long_press<D: ScoreDisplay, T: ToneChannel>(
        &mut self,
        player: Player,
        both_players_held: bool,
        out: &mut Outputs<'_, D, T>,
    ) {
        if both_players_held {
            self.change_ends(player, out);
            return;
        }

        match self.state {
            GameState::Idle => {}
            GameState::InGame | GameState::GameOver => self.remove_point(player, out),
        }
    }

    /// Both player buttons held: the players walked around the table. The
    /// first long press of the gesture already ran the lone remove-point
    /// path, so award the compensating point before swapping sides.
    fn change_ends<D: ScoreDisplay, T: ToneChannel>(
        &mut self,
        player: Player,
        out: &mut Outputs<'_, D, T>,
    ) {
        if self.state == GameState::InGame {
            self.game_scores[player.other().index()] += 1;
        }

        self.game_scores.swap(0, 1);
        self.set_scores.swap(0, 1);
        self.all_time_scores.swap(0, 1);
        log::info!("sides changed");
        self.refresh_display(out.display);
    }

    fn remove_point<D: ScoreDisplay, T: ToneChannel>(
        &mut self,
        player: Player,
        out: &mut Outputs<'_, D, T>,
    ) {
        let index = player.index();

        if self.game_scores[index] == 0 {
            return;
        }

        self.game_scores[index] -= 1;

        if self.state == GameState::GameOver {
            if self.is_game_over() {
                // The removal would not reopen the game; a concluded game is
                // never adjusted silently. Net no-op.
                self.game_scores[index] += 1;
                return;
            }

            // Reopened: the decremented player was the recorded winner, so
            // take back the set and all-time points awarded at game end.
            self.set_scores[index] = self.set_scores[index].saturating_sub(1);
            self.all_time_scores[index] = self.all_time_scores[index].saturating_sub(1);
            self.state = GameState::InGame;
            self.clear_visual(out);
            log::info!(
                "game reopened at {}-{}",
                self.game_scores[0],
                self.game_scores[1]
            );
        }

        self.display_mode = DisplayMode::Game;
        self.current_player = self.serving_player();
        self.refresh_display(out.display);
    }

    fn mode_press<D: ScoreDisplay, T: ToneChannel>(&mut self, out: &mut Outputs<'_, D, T>) {
        self.display_mode = self.display_mode.next();
        self.refresh_scores(out.display);
        self.render_mode_leds(out.display);
        self.render_saved_led(out.display);
    }

    fn mode_long_press<D: ScoreDisplay, T: ToneChannel>(
        &mut self,
        now: Tick,
        out: &mut Outputs<'_, D, T>,
    ) {
        match self.display_mode {
            DisplayMode::Game => match self.state {
                GameState::InGame => {
                    self.game_scores = [0, 0];
                    self.current_player = self.starting_player;
                    log::info!("game scores reset");
                    self.refresh_scores(out.display);
                    self.render_turn(out.display);
                }
                GameState::GameOver => self.start_new_game(out),
                GameState::Idle => {}
            },
            DisplayMode::Set => {
                self.set_scores = [0, 0];
                log::info!("set scores reset");
                self.refresh_scores(out.display);
            }
            DisplayMode::AllTime => {
                self.all_time_scores = [0, 0];
                self.set_scores = [0, 0];
                // Re-baseline the save clock; the zeroed slots reach storage
                // at the next coalescing window like any other change.
                self.last_saved = now;
                log::info!("all-time scores reset");
                self.refresh_scores(out.display);
                self.render_saved_led(out.display);
            }
        }
    }

    /// Standard alternation: the starting player serves the first
    /// `SERVE_SWITCH_EVERY` combined points, then the serve flips.
    fn serving_player(&self) -> Option<Player> {
        let starting = self.starting_player?;
        let combined = self.game_scores[0] + self.game_scores[1];

        if combined % (2 * SERVE_SWITCH_EVERY) < SERVE_SWITCH_EVERY {
            Some(starting)
        } else {
            Some(starting.other())
        }
    }

    fn leading_player(&self) -> Option<Player> {
        match self.game_scores[0].cmp(&self.game_scores[1]) {
            core::cmp::Ordering::Greater => Some(Player::One),
            core::cmp::Ordering::Less => Some(Player::Two),
            core::cmp::Ordering::Equal => None,
        }
    }

    fn displayed_scores(&self) -> [u16; 2] {
        match self.display_mode {
            DisplayMode::Game => self.game_scores,
            DisplayMode::Set => self.set_scores,
            DisplayMode::AllTime => self.all_time_scores,
        }
    }

    fn refresh_scores<D: ScoreDisplay>(&self, display: &mut D) {
        let scores = self.displayed_scores();
        write_score(display, Player::One, scores[0]);
        write_score(display, Player::Two, scores[1]);
    }

    fn render_turn<D: ScoreDisplay>(&self, display: &mut D) {
        let states = match self.current_player {
            Some(Player::One) => 1 << LED_PLAYER1,
            Some(Player::Two) => 1 << LED_PLAYER2,
            None => 0,
        };
        display.set_row(ROW_TURN_LEDS, states);
    }

    fn render_mode_leds<D: ScoreDisplay>(&self, display: &mut D) {
        let led = match self.display_mode {
            DisplayMode::Game => LED_MODE_GAME,
            DisplayMode::Set => LED_MODE_SET,
            DisplayMode::AllTime => LED_MODE_ALL_TIME,
        };
        display.set_row(ROW_MODE_LEDS, 1 << led);
    }

    /// The saved LED is lit only in AllTime mode with nothing left to write.
    fn render_saved_led<D: ScoreDisplay>(&self, display: &mut D) {
        let lit = self.display_mode == DisplayMode::AllTime && self.scores_saved();
        display.set_row(ROW_STATUS_LEDS, if lit { 1 << LED_SAVED } else { 0 });
    }

    fn clear_visual<D: ScoreDisplay, T: ToneChannel>(&mut self, out: &mut Outputs<'_, D, T>) {
        if let Some(frame) = out.sequencer.clear(Track::Visual) {
            if let SequenceKind::Animation(animation) = frame.kind {
                animation.render(frame.position, self.game_scores, out.display);
            }
        }
    }
}
