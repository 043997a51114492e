//! In-memory test doubles for the three device interfaces.
//!
//! Usable from unit tests and from the scenario harness. Fixed-size like
//! everything else in this crate, so they also work without `std`.

use crate::display::{ScoreDisplay, PANEL_DIGITS};
use crate::input::Player;
use crate::melody::Note;
use crate::store::ScoreStore;
use crate::tone::ToneChannel;

/// What a panel digit currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Digit {
    Blank,
    Char(char, bool),
    Row(u8),
}

/// Score display double recording per-digit state.
#[derive(Debug)]
pub struct MockDisplay {
    digits: [Digit; PANEL_DIGITS],
    clears: u32,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            digits: [Digit::Blank; PANEL_DIGITS],
            clears: 0,
        }
    }

    /// Character and dot flag last written to a digit, if it holds one.
    pub fn char_at(&self, digit_index: u8) -> Option<(char, bool)> {
        match self.digits[digit_index as usize % PANEL_DIGITS] {
            Digit::Char(character, dot) => Some((character, dot)),
            _ => None,
        }
    }

    /// Raw row bitmask last written to a digit register (0 when unset).
    pub fn row(&self, row: u8) -> u8 {
        match self.digits[row as usize % PANEL_DIGITS] {
            Digit::Row(states) => states,
            _ => 0,
        }
    }

    pub fn clears(&self) -> u32 {
        self.clears
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreDisplay for MockDisplay {
    fn set_row(&mut self, row: u8, states: u8) {
        self.digits[row as usize % PANEL_DIGITS] = Digit::Row(states);
    }

    fn write_char(&mut self, digit_index: u8, character: char, dot: bool) {
        self.digits[digit_index as usize % PANEL_DIGITS] = Digit::Char(character, dot);
    }

    fn write_number(&mut self, digit_index: u8, number: u8) {
        self.write_char(digit_index, (b'0' + number.min(9)) as char, false);
    }

    fn clear(&mut self) {
        self.digits = [Digit::Blank; PANEL_DIGITS];
        self.clears += 1;
    }
}

/// One recorded tone-channel action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEvent {
    On,
    Off,
    Pitch(Note, u8),
}

const TONE_LOG_CAPACITY: usize = 256;

/// Tone channel double with a bounded action log.
#[derive(Debug)]
pub struct MockTone {
    events: [Option<ToneEvent>; TONE_LOG_CAPACITY],
    len: usize,
    on: bool,
    pitch: Option<(Note, u8)>,
}

impl MockTone {
    pub fn new() -> Self {
        Self {
            events: [None; TONE_LOG_CAPACITY],
            len: 0,
            on: false,
            pitch: None,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn pitch(&self) -> Option<(Note, u8)> {
        self.pitch
    }

    /// Recorded actions in order. The log is bounded; past capacity new
    /// actions still update state but are not recorded.
    pub fn events(&self) -> impl Iterator<Item = ToneEvent> + '_ {
        self.events.iter().take(self.len).filter_map(|event| *event)
    }

    fn record(&mut self, event: ToneEvent) {
        if self.len < TONE_LOG_CAPACITY {
            self.events[self.len] = Some(event);
            self.len += 1;
        }
    }
}

impl Default for MockTone {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneChannel for MockTone {
    fn on(&mut self) {
        self.on = true;
        self.record(ToneEvent::On);
    }

    fn off(&mut self) {
        self.on = false;
        self.record(ToneEvent::Off);
    }

    fn set_pitch(&mut self, note: Note, octave: u8) {
        if note == Note::Rest {
            return;
        }
        self.pitch = Some((note, octave));
        self.record(ToneEvent::Pitch(note, octave));
    }
}

/// Two-slot store double counting writes per slot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: [u16; 2],
    writes: [u32; 2],
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scores(slots: [u16; 2]) -> Self {
        Self { slots, writes: [0, 0] }
    }

    pub fn slot(&self, player: Player) -> u16 {
        self.slots[player.index()]
    }

    pub fn writes(&self, player: Player) -> u32 {
        self.writes[player.index()]
    }

    pub fn total_writes(&self) -> u32 {
        self.writes.iter().sum()
    }
}

impl ScoreStore for MemoryStore {
    fn read(&mut self, player: Player) -> u16 {
        self.slots[player.index()]
    }

    fn write(&mut self, player: Player, value: u16) {
        self.slots[player.index()] = value;
        self.writes[player.index()] += 1;
    }
}
