//! Button input abstraction.

/// Physical device buttons (directly maps to hardware)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Player1,
    Player2,
    Mode,
}

impl Button {
    pub const COUNT: usize = 3;
    pub const ALL: [Button; Button::COUNT] = [Button::Player1, Button::Player2, Button::Mode];

    pub fn index(self) -> usize {
        match self {
            Button::Player1 => 0,
            Button::Player2 => 1,
            Button::Mode => 2,
        }
    }

    /// The player a score button belongs to; `None` for the mode button.
    pub fn player(self) -> Option<Player> {
        match self {
            Button::Player1 => Some(Player::One),
            Button::Player2 => Some(Player::Two),
            Button::Mode => None,
        }
    }
}

/// One of the two scoring sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// Debounced input events produced by the button monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(Button),
    LongPress(Button),
}

/// Snapshot of the raw pin levels, sampled once per tick before the scan.
/// `true` means the pin reads pressed (active low on the hardware).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PinLevels {
    pressed: [bool; Button::COUNT],
}

impl PinLevels {
    /// All buttons released.
    pub fn released() -> Self {
        Self::default()
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        self.pressed[button.index()] = pressed;
    }

    pub fn pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }
}
