//! Consumed durable-storage interface for the all-time score slots.

use crate::input::Player;

/// Two-slot durable store, one slot per player's all-time score.
///
/// Read once at startup; written only through the game engine's coalescing
/// rule, which bounds write-endurance pressure on the backing storage.
/// Implementations log-and-drop I/O errors; the core assumes writes stick.
pub trait ScoreStore {
    /// Read a player's persisted all-time score.
    fn read(&mut self, player: Player) -> u16;

    /// Persist a player's all-time score.
    fn write(&mut self, player: Player, value: u16);
}
