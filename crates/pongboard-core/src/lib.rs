//! Control core for a two-player table-tennis scoreboard appliance.
//! Hardware-independent: runs on ESP32 firmware and on the host test harness.
//!
//! Everything is driven by a fixed 2 ms tick. Each tick runs, in order, the
//! button scan, the sequencer, and the game engine; the only state touched
//! outside that path is the per-button edge notification (see
//! [`Controller::pin_edge`]).

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

pub mod animation;
pub mod button;
pub mod controller;
pub mod display;
pub mod game;
pub mod input;
pub mod melody;
pub mod mock;
pub mod sequencer;
pub mod store;
pub mod tone;

pub use animation::Animation;
pub use button::{ButtonMonitor, DEBOUNCE_TICKS, LONG_PRESS_TICKS, PRESS_TICKS};
pub use controller::Controller;
pub use display::ScoreDisplay;
pub use game::{
    DisplayMode, GameEngine, GameState, MIN_WIN_DIFF, POINTS_TO_WIN, SAVE_COALESCE_TICKS,
    SERVE_SWITCH_EVERY,
};
pub use input::{Button, InputEvent, PinLevels, Player};
pub use melody::{Melody, MelodyPlayer, Note};
pub use mock::{MemoryStore, MockDisplay, MockTone, ToneEvent};
pub use sequencer::{Frame, Sequence, SequenceKind, Sequencer, Track};
pub use store::ScoreStore;
pub use tone::{note_frequency_hz, ToneChannel, BASE_OCTAVE};

/// One unit of logical time: a single period of the fixed 2 ms tick source.
/// Deltas use wrapping subtraction; the counter wraps after ~99 days.
pub type Tick = u32;

/// Tick period the constants in this crate are calibrated for.
pub const TICK_MS: u32 = 2;
