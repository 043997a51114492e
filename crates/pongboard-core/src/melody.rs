//! Melodies and the audio-track playback cursor.
//!
//! Melodies are authored as packed 16-bit words (nibble 3 is the note,
//! nibble 2 the octave, byte 0 the duration in melody steps) and decoded at
//! compile time into plain [`MelodyStep`] records. The packed form is purely
//! a constant-table serialization; nothing decodes it at runtime.

use crate::sequencer::{Sequence, SequenceKind, Sequencer, Track};
use crate::tone::ToneChannel;

/// The twelve pitches plus a rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Note {
    C,
    Db,
    D,
    Eb,
    E,
    F,
    Gb,
    G,
    Ab,
    A,
    Bb,
    B,
    Rest,
}

impl Note {
    /// Semitone index within the octave; `None` for `Rest`.
    pub fn pitch_index(self) -> Option<usize> {
        match self {
            Note::C => Some(0),
            Note::Db => Some(1),
            Note::D => Some(2),
            Note::Eb => Some(3),
            Note::E => Some(4),
            Note::F => Some(5),
            Note::Gb => Some(6),
            Note::G => Some(7),
            Note::Ab => Some(8),
            Note::A => Some(9),
            Note::Bb => Some(10),
            Note::B => Some(11),
            Note::Rest => None,
        }
    }
}

/// One decoded melody entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MelodyStep {
    pub note: Note,
    pub octave: u8,
    /// How many melody steps this entry is held for.
    pub duration: u8,
}

const fn step(raw: u16) -> MelodyStep {
    let note = match raw >> 12 {
        0 => Note::C,
        1 => Note::Db,
        2 => Note::D,
        3 => Note::Eb,
        4 => Note::E,
        5 => Note::F,
        6 => Note::Gb,
        7 => Note::G,
        8 => Note::Ab,
        9 => Note::A,
        10 => Note::Bb,
        11 => Note::B,
        _ => Note::Rest,
    };

    MelodyStep {
        note,
        octave: ((raw >> 8) & 0xF) as u8,
        duration: (raw & 0xFF) as u8,
    }
}

const STARTUP_STEPS: [MelodyStep; 4] = [
    step(0x0401), // C4
    step(0x4401), // E4
    step(0x7401), // G4
    step(0x0502), // C5, held twice as long
];

const WIN_STEPS: [MelodyStep; 7] = [
    step(0x7401), // G4
    step(0x0501), // C5
    step(0x4501), // E5
    step(0x7501), // G5
    step(0xC401), // rest
    step(0x4501), // E5
    step(0x7504), // G5, held
];

const BUTTON_PRESS_STEPS: [MelodyStep; 2] = [
    step(0x0401), // C4
    step(0x0501), // C5
];

const BUTTON_LONG_PRESS_STEPS: [MelodyStep; 2] = [
    step(0x0503), // C5, held
    step(0x0402), // C4
];

const fn total_frames(steps: &[MelodyStep]) -> i32 {
    let mut index = 0;
    let mut total = 0;

    while index < steps.len() {
        total += steps[index].duration as i32;
        index += 1;
    }

    // One trailing frame so the last entry's window closes before the track
    // retires.
    total + 1
}

/// The closed set of melodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Melody {
    Startup,
    Win,
    ButtonPress,
    ButtonLongPress,
}

impl Melody {
    /// Short feedback cues, as opposed to substantive melodies. Effects never
    /// interrupt a substantive melody; substantive melodies always preempt
    /// effects.
    pub fn is_effect(self) -> bool {
        matches!(self, Melody::ButtonPress | Melody::ButtonLongPress)
    }

    /// Ticks between melody steps.
    pub fn step_ticks(self) -> u16 {
        match self {
            Melody::Startup => 50,
            Melody::Win => 75,
            Melody::ButtonPress | Melody::ButtonLongPress => 25,
        }
    }

    pub fn steps(self) -> &'static [MelodyStep] {
        match self {
            Melody::Startup => &STARTUP_STEPS,
            Melody::Win => &WIN_STEPS,
            Melody::ButtonPress => &BUTTON_PRESS_STEPS,
            Melody::ButtonLongPress => &BUTTON_LONG_PRESS_STEPS,
        }
    }

    /// The audio-track sequence that times this melody.
    pub fn sequence(self) -> Sequence {
        Sequence::new(
            SequenceKind::Melody(self),
            self.step_ticks(),
            total_frames(self.steps()),
        )
    }
}

/// Playback cursor for the audio track.
///
/// The sequencer owns the timing (which tick is a melody step); this player
/// owns the note cursor: which entry is sounding and how far into its
/// duration window it is. Exactly one start-tone action is issued per entry;
/// the channel is left alone for the remainder of the entry's window.
#[derive(Debug, Default)]
pub struct MelodyPlayer {
    active: Option<Melody>,
    entry: usize,
    step_position: u8,
}

impl MelodyPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<Melody> {
        self.active
    }

    /// Install a melody on the audio track, resetting the cursor.
    ///
    /// Effect cues are dropped while the track holds a substantive melody;
    /// anything else preempts whatever is playing. Returns whether the
    /// melody was actually triggered.
    pub fn trigger<T: ToneChannel>(
        &mut self,
        sequencer: &mut Sequencer,
        tone: &mut T,
        melody: Melody,
    ) -> bool {
        if melody.is_effect() {
            if let Some(SequenceKind::Melody(playing)) = sequencer.active(Track::Audio) {
                if !playing.is_effect() {
                    log::debug!("effect {melody:?} dropped, {playing:?} still playing");
                    return false;
                }
            }
        }

        tone.off();
        self.active = Some(melody);
        self.entry = 0;
        self.step_position = 0;
        sequencer.trigger(Track::Audio, melody.sequence());
        true
    }

    /// Advance one melody step. Called by the controller for every due audio
    /// frame; a finished cursor silences the channel and goes inert even if
    /// the track sequence has frames left.
    pub fn frame<T: ToneChannel>(&mut self, tone: &mut T) {
        let Some(melody) = self.active else { return };
        let steps = melody.steps();

        let Some(current) = steps.get(self.entry) else {
            self.stop(tone);
            return;
        };

        if self.step_position < current.duration {
            if self.step_position == 0 {
                start_entry(tone, current);
            }
            self.step_position += 1;
            return;
        }

        self.entry += 1;

        if self.entry == steps.len() {
            self.stop(tone);
            return;
        }

        start_entry(tone, &steps[self.entry]);
        self.step_position = 1;
    }

    /// Silence the channel and drop the cursor.
    pub fn stop<T: ToneChannel>(&mut self, tone: &mut T) {
        self.active = None;
        self.entry = 0;
        self.step_position = 0;
        tone.off();
    }
}

fn start_entry<T: ToneChannel>(tone: &mut T, entry: &MelodyStep) {
    if entry.note == Note::Rest {
        tone.off();
        return;
    }

    tone.set_pitch(entry.note, entry.octave);
    tone.on();
}
