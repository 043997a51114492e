//! The single owned controller object: all mutable state of the control
//! core lives here, and all of it is advanced from the tick path.
//!
//! The tick source (a hardware timer on the device, a loop in the harness)
//! calls [`Controller::tick`] once per 2 ms period. Each tick runs the
//! button scan, the sequencer, and the game engine in that fixed order,
//! synchronously and non-reentrantly. The only entry point outside that
//! path is [`Controller::pin_edge`], whose write set is the per-button
//! `down`/`last_down` pair.

use crate::button::ButtonMonitor;
use crate::display::ScoreDisplay;
use crate::game::{GameEngine, Outputs};
use crate::input::{Button, PinLevels, Player};
use crate::melody::MelodyPlayer;
use crate::sequencer::{SequenceKind, Sequencer, Track};
use crate::store::ScoreStore;
use crate::tone::ToneChannel;
use crate::Tick;

pub struct Controller<D, T, S> {
    ticks: Tick,
    buttons: ButtonMonitor,
    sequencer: Sequencer,
    melody: MelodyPlayer,
    game: GameEngine,
    display: D,
    tone: T,
    store: S,
}

impl<D, T, S> Controller<D, T, S>
where
    D: ScoreDisplay,
    T: ToneChannel,
    S: ScoreStore,
{
    /// Wire up the core: loads the all-time scores (the only state that
    /// survives power loss), renders the initial screen, and starts the
    /// power-on splash.
    pub fn new(display: D, tone: T, mut store: S) -> Self {
        let all_time_scores = [store.read(Player::One), store.read(Player::Two)];
        log::info!(
            "all-time scores loaded: {}-{}",
            all_time_scores[0],
            all_time_scores[1]
        );

        let mut controller = Self {
            ticks: 0,
            buttons: ButtonMonitor::new(),
            sequencer: Sequencer::new(),
            melody: MelodyPlayer::new(),
            game: GameEngine::new(all_time_scores),
            display,
            tone,
            store,
        };

        let mut out = Outputs {
            display: &mut controller.display,
            tone: &mut controller.tone,
            sequencer: &mut controller.sequencer,
            melody: &mut controller.melody,
        };
        controller.game.startup(&mut out);
        controller
    }

    /// Edge-notification entry point, safe to call between ticks. Only the
    /// per-button `down`/`last_down` pair is written here; everything else
    /// belongs to the tick path.
    pub fn pin_edge(&mut self, button: Button, pressed: bool) {
        self.buttons.pin_edge(button, pressed, self.ticks);
    }

    /// Advance one tick. `levels` is the pin snapshot for this period.
    pub fn tick(&mut self, levels: PinLevels) {
        self.ticks = self.ticks.wrapping_add(1);
        let now = self.ticks;

        // Button scan. Events are handled as they fire, button by button, so
        // a long press on the first player button sees the second button's
        // held state exactly as it was at that instant. That ordering is
        // what makes the change-ends gesture's undo-then-swap work.
        for button in Button::ALL {
            let Some(event) = self.buttons.scan_button(button, now, levels.pressed(button)) else {
                continue;
            };

            let both_players_held =
                self.buttons.is_held(Button::Player1) && self.buttons.is_held(Button::Player2);
            let mut out = Outputs {
                display: &mut self.display,
                tone: &mut self.tone,
                sequencer: &mut self.sequencer,
                melody: &mut self.melody,
            };
            self.game.handle_event(event, both_players_held, now, &mut out);
        }

        // Sequencer frames for both tracks.
        let frames = self.sequencer.tick(now);

        if let Some(frame) = frames[Track::Visual.index()] {
            if let SequenceKind::Animation(animation) = frame.kind {
                self.game
                    .render_animation_frame(animation, frame.position, &mut self.display);
            }
        }

        if let Some(frame) = frames[Track::Audio.index()] {
            if let SequenceKind::Melody(_) = frame.kind {
                self.melody.frame(&mut self.tone);
            }
        }

        // Game tick: coalesced persistence.
        self.game.tick(now, &mut self.display, &mut self.store);
    }

    pub fn ticks(&self) -> Tick {
        self.ticks
    }

    pub fn game(&self) -> &GameEngine {
        &self.game
    }

    pub fn buttons(&self) -> &ButtonMonitor {
        &self.buttons
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn tone(&self) -> &T {
        &self.tone
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
