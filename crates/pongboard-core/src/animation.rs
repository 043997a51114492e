//! Visual sequences rendered on the score panel.

use crate::display::{blank_score, write_score, ScoreDisplay, DIGIT_P1_TENS};
use crate::input::Player;
use crate::sequencer::{Sequence, SequenceKind};

/// The closed set of visual sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    /// Power-on splash: blinks "Pong" across the score digits and leaves it
    /// showing until the first game render replaces it.
    Startup,
    Player1Win,
    Player2Win,
}

impl Animation {
    /// Ticks between frames (300 ms splash blink, 200 ms win blink at the
    /// 2 ms tick).
    pub fn step_ticks(self) -> u16 {
        match self {
            Animation::Startup => 150,
            Animation::Player1Win | Animation::Player2Win => 100,
        }
    }

    /// Frame count. Both blink patterns end on a "shown" frame so a finished
    /// or cut-short animation always leaves readable digits behind.
    pub fn frame_count(self) -> i32 {
        match self {
            Animation::Startup => 7,
            Animation::Player1Win | Animation::Player2Win => 8,
        }
    }

    pub fn win_for(player: Player) -> Animation {
        match player {
            Player::One => Animation::Player1Win,
            Player::Two => Animation::Player2Win,
        }
    }

    /// The sequence that plays this animation.
    pub fn sequence(self) -> Sequence {
        Sequence::new(
            SequenceKind::Animation(self),
            self.step_ticks(),
            self.frame_count(),
        )
    }

    /// Render one frame. Win animations blink the winner's score field, so
    /// they need the current game scores; the splash ignores them.
    pub fn render<D: ScoreDisplay>(self, position: u32, game_scores: [u16; 2], display: &mut D) {
        match self {
            Animation::Startup => render_splash(position, display),
            Animation::Player1Win => render_win(Player::One, position, game_scores, display),
            Animation::Player2Win => render_win(Player::Two, position, game_scores, display),
        }
    }
}

fn render_splash<D: ScoreDisplay>(position: u32, display: &mut D) {
    // Digits are wired left to right from the highest index down.
    let banner = ['P', 'o', 'n', 'g'];

    for (offset, character) in banner.iter().enumerate() {
        let digit = DIGIT_P1_TENS - offset as u8;
        let shown = position % 2 == 0;
        display.write_char(digit, if shown { *character } else { ' ' }, false);
    }
}

fn render_win<D: ScoreDisplay>(
    winner: Player,
    position: u32,
    game_scores: [u16; 2],
    display: &mut D,
) {
    if position % 2 == 0 {
        blank_score(display, winner);
    } else {
        write_score(display, winner, game_scores[winner.index()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDisplay;

    #[test]
    fn win_animation_sequences_end_on_a_shown_frame() {
        for animation in [Animation::Player1Win, Animation::Player2Win] {
            // Final frame index is odd: the score is rewritten, not blanked.
            assert_eq!((animation.frame_count() - 1) % 2, 1);
        }
    }

    #[test]
    fn splash_ends_showing_the_banner() {
        let mut display = MockDisplay::new();
        let last = Animation::Startup.frame_count() as u32 - 1;
        Animation::Startup.render(last, [0, 0], &mut display);

        assert_eq!(display.char_at(DIGIT_P1_TENS), Some(('P', false)));
        assert_eq!(display.char_at(DIGIT_P1_TENS - 3), Some(('g', false)));
    }

    #[test]
    fn win_frames_alternate_blank_and_score() {
        let mut display = MockDisplay::new();
        let scores = [11, 9];

        Animation::Player1Win.render(0, scores, &mut display);
        assert_eq!(display.char_at(DIGIT_P1_TENS), Some((' ', false)));

        Animation::Player1Win.render(1, scores, &mut display);
        assert_eq!(display.char_at(DIGIT_P1_TENS), Some(('1', false)));
        assert_eq!(display.char_at(DIGIT_P1_TENS - 1), Some(('1', true)));
    }

    #[test]
    fn win_for_maps_players() {
        assert_eq!(Animation::win_for(Player::One), Animation::Player1Win);
        assert_eq!(Animation::win_for(Player::Two), Animation::Player2Win);
    }
}
