//! Generic two-track fixed-step frame player.
//!
//! Each track holds at most one active [`Sequence`]. A sequence is pure
//! timing: which kind of playback it is, how many ticks between frames, and
//! how many frames it runs. What a frame actually does is dispatched by the
//! controller from the closed [`SequenceKind`] tag.

use crate::animation::Animation;
use crate::melody::Melody;
use crate::Tick;

/// An independent output channel within the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Visual,
    Audio,
}

impl Track {
    pub const COUNT: usize = 2;

    pub fn index(self) -> usize {
        match self {
            Track::Visual => 0,
            Track::Audio => 1,
        }
    }
}

/// What an active sequence plays. Closed set: there are no user-supplied
/// frame callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    Animation(Animation),
    Melody(Melody),
}

/// A fixed-step, finite playback unit.
#[derive(Debug, Clone, Copy)]
pub struct Sequence {
    pub kind: SequenceKind,
    step_ticks: u16,
    /// Frame count; -1 is reserved for an infinite sequence (unused by the
    /// current animations and melodies).
    duration: i32,
    position: u32,
}

impl Sequence {
    pub fn new(kind: SequenceKind, step_ticks: u16, duration: i32) -> Self {
        Self {
            kind,
            step_ticks: step_ticks.max(1),
            duration,
            position: 0,
        }
    }
}

/// A due frame for one track: what to play and which frame index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub kind: SequenceKind,
    pub position: u32,
}

/// Two-track sequencer; one active-sequence slot per track.
#[derive(Debug, Default)]
pub struct Sequencer {
    slots: [Option<Sequence>; Track::COUNT],
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance both tracks. For each track whose step boundary falls on
    /// `now`, either retire a finished sequence (no frame) or produce the
    /// frame at the current position and advance.
    pub fn tick(&mut self, now: Tick) -> [Option<Frame>; Track::COUNT] {
        let mut frames = [None; Track::COUNT];

        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(sequence) = slot else { continue };

            if now % Tick::from(sequence.step_ticks) != 0 {
                continue;
            }

            if sequence.duration >= 0 && sequence.position == sequence.duration as u32 {
                *slot = None;
                continue;
            }

            frames[index] = Some(Frame {
                kind: sequence.kind,
                position: sequence.position,
            });
            sequence.position += 1;
        }

        frames
    }

    /// Install a sequence at position 0, discarding whatever was active on
    /// the track without a final frame (abrupt preemption).
    pub fn trigger(&mut self, track: Track, sequence: Sequence) {
        self.slots[track.index()] = Some(Sequence {
            position: 0,
            ..sequence
        });
    }

    /// Cut the track's sequence short: returns its final frame
    /// (`position == duration - 1`) for the caller to render exactly once,
    /// and empties the slot. Idle tracks and infinite sequences yield `None`.
    pub fn clear(&mut self, track: Track) -> Option<Frame> {
        let sequence = self.slots[track.index()].take()?;

        if sequence.duration <= 0 {
            return None;
        }

        Some(Frame {
            kind: sequence.kind,
            position: sequence.duration as u32 - 1,
        })
    }

    /// The kind currently occupying a track, if any.
    pub fn active(&self, track: Track) -> Option<SequenceKind> {
        self.slots[track.index()].map(|sequence| sequence.kind)
    }

    pub fn is_idle(&self, track: Track) -> bool {
        self.slots[track.index()].is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIND: SequenceKind = SequenceKind::Animation(Animation::Startup);

    #[test]
    fn frames_fire_on_step_boundaries_only() {
        let mut sequencer = Sequencer::new();
        sequencer.trigger(Track::Visual, Sequence::new(KIND, 10, 3));

        let mut fired = Vec::new();
        for now in 1..=40 {
            if let Some(frame) = sequencer.tick(now)[Track::Visual.index()] {
                fired.push((now, frame.position));
            }
        }

        assert_eq!(fired, vec![(10, 0), (20, 1), (30, 2)]);
        assert!(sequencer.is_idle(Track::Visual));
    }

    #[test]
    fn retirement_produces_no_frame() {
        let mut sequencer = Sequencer::new();
        sequencer.trigger(Track::Visual, Sequence::new(KIND, 5, 2));

        assert!(sequencer.tick(5)[0].is_some());
        assert!(sequencer.tick(10)[0].is_some());
        // position == duration: the slot clears without a frame.
        assert!(sequencer.tick(15)[0].is_none());
        assert!(sequencer.is_idle(Track::Visual));
    }

    #[test]
    fn trigger_preempts_without_final_frame() {
        let mut sequencer = Sequencer::new();
        sequencer.trigger(Track::Visual, Sequence::new(KIND, 5, 10));
        sequencer.tick(5);
        sequencer.tick(10);

        let replacement = SequenceKind::Animation(Animation::Player1Win);
        sequencer.trigger(Track::Visual, Sequence::new(replacement, 5, 4));

        let frame = sequencer.tick(15)[0].expect("replacement frame");
        assert_eq!(frame.kind, replacement);
        assert_eq!(frame.position, 0);
    }

    #[test]
    fn clear_yields_exactly_the_final_frame() {
        let mut sequencer = Sequencer::new();
        sequencer.trigger(Track::Visual, Sequence::new(KIND, 5, 8));
        sequencer.tick(5);

        let frame = sequencer.clear(Track::Visual).expect("final frame");
        assert_eq!(frame.position, 7);
        assert!(sequencer.is_idle(Track::Visual));
        assert_eq!(sequencer.clear(Track::Visual), None);
    }

    #[test]
    fn tracks_advance_independently() {
        let mut sequencer = Sequencer::new();
        sequencer.trigger(Track::Visual, Sequence::new(KIND, 4, 10));
        sequencer.trigger(
            Track::Audio,
            Sequence::new(SequenceKind::Melody(Melody::Startup), 6, 10),
        );

        let frames = sequencer.tick(12);
        assert!(frames[Track::Visual.index()].is_some());
        assert!(frames[Track::Audio.index()].is_some());

        let frames = sequencer.tick(16);
        assert!(frames[Track::Visual.index()].is_some());
        assert!(frames[Track::Audio.index()].is_none());
    }

    #[test]
    fn infinite_sequence_never_retires() {
        let mut sequencer = Sequencer::new();
        sequencer.trigger(Track::Visual, Sequence::new(KIND, 1, -1));

        for now in 1..=1000 {
            assert!(sequencer.tick(now)[0].is_some());
        }
        assert!(!sequencer.is_idle(Track::Visual));
    }
}
